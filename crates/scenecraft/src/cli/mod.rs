//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the scenecraft binary.

mod commands;
mod drafts;
mod generate;
mod plan;

pub use commands::{Cli, Commands};
pub use drafts::handle_drafts_command;
pub use generate::run_generate;
pub use plan::{run_estimate, run_plan, run_prompts};

use scenecraft::{ScenecraftConfig, ScenecraftResult};
use std::path::{Path, PathBuf};

/// Load configuration from an explicit file, or the usual locations.
pub fn load_config(path: Option<&Path>) -> ScenecraftResult<ScenecraftConfig> {
    match path {
        Some(path) => ScenecraftConfig::from_file(path),
        None => ScenecraftConfig::load(),
    }
}

/// Draft store directory: the `--store` argument, else the user data dir.
pub fn store_dir(store: Option<&Path>) -> PathBuf {
    match store {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_local_dir()
            .map(|dir| dir.join("scenecraft").join("drafts"))
            .unwrap_or_else(|| PathBuf::from(".scenecraft").join("drafts")),
    }
}
