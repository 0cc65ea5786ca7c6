//! Draft management command handlers.

use super::commands::{DraftCommands, OutputFormat};
use super::store_dir;
use scenecraft::{
    DraftHistory, FileDraftStore, JsonError, ScenecraftConfig, ScenecraftResult, TopicDraft,
    parse_draft_id,
};
use std::path::Path;
use std::sync::Arc;

/// Handle draft management commands.
pub async fn handle_drafts_command(
    config: &ScenecraftConfig,
    store: Option<&Path>,
    command: DraftCommands,
) -> ScenecraftResult<()> {
    let store = Arc::new(FileDraftStore::new(store_dir(store))?);
    let history = DraftHistory::new(store, config.history.archive_cap);

    match command {
        DraftCommands::List { format } => list_drafts(&history, format).await,
        DraftCommands::Show { query } => show_draft(&history, &query).await,
        DraftCommands::Delete { id } => {
            let id = parse_draft_id(&id)?;
            if history.delete(id).await? {
                println!("Deleted {}", id);
            } else {
                println!("No draft {}", id);
            }
            Ok(())
        }
        DraftCommands::Favorite { id } => {
            let id = parse_draft_id(&id)?;
            let favorite = history.toggle_favorite(id).await?;
            println!(
                "{} {}",
                id,
                if favorite { "is a favorite" } else { "is no longer a favorite" }
            );
            Ok(())
        }
    }
}

fn summary(draft: &TopicDraft) -> String {
    let id = draft
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(autosave)".to_string());
    format!(
        "{} {:<36} {:>3} scenes  {}  {}",
        if draft.favorite { "*" } else { " " },
        id,
        draft.scenes.len(),
        draft.updated_at.format("%Y-%m-%d %H:%M"),
        draft.topic.trim()
    )
}

async fn list_drafts(history: &DraftHistory, format: OutputFormat) -> ScenecraftResult<()> {
    let drafts = history.list().await?;
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&drafts)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            for draft in &drafts {
                println!("{}", summary(draft));
            }
            println!("Total: {} drafts", drafts.len());
        }
    }
    Ok(())
}

async fn show_draft(history: &DraftHistory, query: &str) -> ScenecraftResult<()> {
    match history.load(query).await? {
        Some(draft) => {
            let json = serde_json::to_string_pretty(&draft)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        None => println!("No draft matches '{}'", query),
    }
    Ok(())
}
