//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use scenecraft::AudioOptions;
use std::path::PathBuf;

/// SceneCraft - turn a topic into a planned, scripted and generated storyboard video
#[derive(Parser, Debug)]
#[command(name = "scenecraft")]
#[command(about = "Turn a topic into a planned, scripted and generated storyboard video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ~/.config/scenecraft/scenecraft.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the planned scenes and their settings
    Plan {
        /// Target duration in seconds
        #[arg(long)]
        duration: Option<u32>,

        /// Pin the scene count instead of deriving it
        #[arg(long)]
        scenes: Option<usize>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the style guide and per-scene image and video blocks
    Prompts {
        /// Topic text
        #[arg(long)]
        topic: String,

        /// Target duration in seconds
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Print the cost estimate
    Estimate {
        /// Target duration in seconds
        #[arg(long)]
        duration: Option<u32>,

        /// Pin the scene count instead of deriving it
        #[arg(long)]
        scenes: Option<usize>,

        /// Audio toggles
        #[command(flatten)]
        audio: AudioArgs,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Run script, frames, clips and music, then save the draft
    Generate(GenerateArgs),

    /// Saved draft management
    Drafts {
        /// Draft store directory
        #[arg(long, global = true)]
        store: Option<PathBuf>,

        /// Draft command
        #[command(subcommand)]
        command: DraftCommands,
    },
}

/// Audio toggles shared by `estimate` and `generate`.
#[derive(Args, Debug, Clone, Default)]
pub struct AudioArgs {
    /// Narration (adds a dialogue pass and clip audio)
    #[arg(long)]
    pub narration: bool,

    /// Sound effects in clips
    #[arg(long)]
    pub sfx: bool,

    /// Background music track
    #[arg(long)]
    pub music: bool,
}

impl AudioArgs {
    /// Audio options with these toggles applied.
    pub fn to_options(&self) -> AudioOptions {
        let mut audio = AudioOptions::default();
        audio.narration.enabled = self.narration;
        audio.sound_effects.enabled = self.sfx;
        audio.music.enabled = self.music;
        audio
    }
}

/// Arguments of the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Topic text
    #[arg(long)]
    pub topic: String,

    /// Target duration in seconds
    #[arg(long)]
    pub duration: Option<u32>,

    /// Scenes generated at once
    #[arg(long, default_value = "2")]
    pub concurrency: usize,

    /// Draft store directory
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// JSON file with the character registry
    #[arg(long)]
    pub characters: Option<PathBuf>,

    /// Character id to feature (repeatable)
    #[arg(long = "character")]
    pub character_ids: Vec<String>,

    /// Audio toggles
    #[command(flatten)]
    pub audio: AudioArgs,
}

/// Draft management subcommands
#[derive(Subcommand, Debug)]
pub enum DraftCommands {
    /// List saved drafts, most recent first
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show a draft by id or topic text
    Show {
        /// Draft id or topic text
        query: String,
    },

    /// Delete a draft by id
    Delete {
        /// Draft id
        id: String,
    },

    /// Toggle the favorite flag of a draft
    Favorite {
        /// Draft id
        id: String,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
