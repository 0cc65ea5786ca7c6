//! Generation command handler.

use super::commands::GenerateArgs;
use super::store_dir;
use scenecraft::{
    AbortSignal, Autosaver, CharacterRegistry, CharacterSelection, Dimension, DraftHistory,
    DraftSession, FileDraftStore, HttpInvoker, InMemoryCharacterRegistry, RetryExecutor,
    RetryPolicy, SceneGenerator, SceneStatus, ScenecraftConfig, ScenecraftResult, SeedMode,
    is_known, resolve_character_slots, scene_count,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Run the full pipeline for a topic and save the draft.
#[instrument(skip(config, args), fields(topic = %args.topic))]
pub async fn run_generate(config: &ScenecraftConfig, args: GenerateArgs) -> ScenecraftResult<()> {
    let invoker = Arc::new(HttpInvoker::from_env(&config.invoker)?);
    let executor = RetryExecutor::new(invoker, RetryPolicy::from(&config.retry));

    let store = Arc::new(FileDraftStore::new(store_dir(args.store.as_deref()))?);
    let history = Arc::new(DraftHistory::new(store, config.history.archive_cap));
    let autosaver = Autosaver::spawn(history.clone(), config.history.quiet_period());

    let mut session = DraftSession::init(config);
    session.new_topic(&args.topic)?;
    if let Some(duration) = args.duration {
        let duration_id = format!("{}s", duration);
        if !is_known(Dimension::Duration, &duration_id) {
            warn!(
                seconds = duration,
                "Duration is not in the catalog, planning by scene count"
            );
        }
        session.set_duration(&duration_id);
        session.replan(Some(scene_count(duration, *session.clip_seconds(), None)));
    }
    session.set_audio(args.audio.to_options());
    session.select_characters(
        args.character_ids
            .iter()
            .map(|id| CharacterSelection::new(id.as_str()))
            .collect(),
    );
    session.autosave(&autosaver);

    let characters = match &args.characters {
        Some(path) => InMemoryCharacterRegistry::from_json_file(path)
            .await?
            .list()
            .await?,
        None => Vec::new(),
    };
    let slots = resolve_character_slots(&characters, &session.draft().characters);

    let generator = SceneGenerator::new(
        executor,
        session.preferences().clone(),
        *session.clip_seconds(),
    );

    println!("Writing script for {} scenes...", session.draft().scenes.len());
    let script = generator.write_script(session.draft(), &slots).await?;
    session.apply_script(script);
    if session.draft().audio.narration.enabled {
        let lines = generator.write_dialogue(session.draft()).await?;
        session.apply_dialogue(lines);
    }
    session.autosave(&autosaver);

    let abort = AbortSignal::new();
    let signal = abort.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, no further scenes will start");
            signal.raise();
        }
    });

    let outcomes = generator
        .generate_all(
            session.draft(),
            &slots,
            SeedMode::Fresh,
            args.concurrency,
            &abort,
        )
        .await;
    for outcome in outcomes {
        match outcome.status() {
            SceneStatus::Completed => println!("Scene {}: done", outcome.scene_index() + 1),
            SceneStatus::Failed(message) => {
                println!("Scene {}: failed: {}", outcome.scene_index() + 1, message)
            }
            SceneStatus::Abandoned => println!("Scene {}: skipped", outcome.scene_index() + 1),
        }
        session.apply_outcome(outcome);
    }
    session.autosave(&autosaver);

    if !abort.is_raised() {
        match generator.generate_music(session.draft()).await {
            Ok(Some(url)) => session.set_music(Some(url)),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Music generation failed"),
        }
    }

    let id = session.persist(&history, Some(&autosaver)).await?;
    autosaver.shutdown().await;
    info!(%id, "Draft saved");
    println!("Saved draft {}", id);
    Ok(())
}
