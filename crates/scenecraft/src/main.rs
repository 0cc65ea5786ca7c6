//! SceneCraft CLI binary.
//!
//! This binary provides command-line access to SceneCraft:
//! - Plan scenes and preview prompts for a topic
//! - Estimate generation cost
//! - Run the full generation pipeline
//! - Manage saved drafts

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_drafts_command, run_estimate, run_generate, run_plan, run_prompts};

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan {
            duration,
            scenes,
            format,
        } => run_plan(&config, duration, scenes, format)?,

        Commands::Prompts { topic, duration } => run_prompts(&config, &topic, duration)?,

        Commands::Estimate {
            duration,
            scenes,
            audio,
            format,
        } => run_estimate(&config, duration, scenes, &audio, format)?,

        Commands::Generate(args) => run_generate(&config, args).await?,

        Commands::Drafts { store, command } => {
            handle_drafts_command(&config, store.as_deref(), command).await?
        }
    }

    Ok(())
}
