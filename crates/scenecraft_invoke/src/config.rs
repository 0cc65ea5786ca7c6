//! Configuration for the SceneCraft pipeline.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (include_str! from scenecraft.toml)
//! - ~/.config/scenecraft/scenecraft.toml
//! - ./scenecraft.toml
//!
//! Every section and field has a default, so a partial override file only
//! needs the values it changes.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use scenecraft_core::ModelPreferences;
use scenecraft_error::{
    ConfigError, PipelineError, PipelineErrorKind, ScenecraftError, ScenecraftResult,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Retry schedule for generation calls.
///
/// ```toml
/// [retry]
/// max_attempts = 3
/// backoff_step_ms = 2000   # delay before attempt n+1 is step * n
/// max_delay_ms = 60000
/// strip_delay_ms = 500     # delay before the reference-stripped retry
/// jitter = true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per invocation, including the first
    pub max_attempts: u32,
    /// Linear backoff step in milliseconds
    pub backoff_step_ms: u64,
    /// Upper bound for a single backoff delay in milliseconds
    pub max_delay_ms: u64,
    /// Fixed delay before re-issuing a request without reference images
    pub strip_delay_ms: u64,
    /// Randomize backoff delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step_ms: 2000,
            max_delay_ms: 60_000,
            strip_delay_ms: 500,
            jitter: true,
        }
    }
}

/// Scene planner settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Longest clip the video model produces, in seconds
    pub clip_seconds: u32,
    /// Duration used when none is given
    pub default_duration_seconds: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            clip_seconds: 8,
            default_duration_seconds: 30,
        }
    }
}

/// Default model keys per generation kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Text (script) model
    pub text: String,
    /// Image model
    pub image: String,
    /// Video model
    pub video: String,
    /// Music model
    pub music: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            text: "script-standard".to_string(),
            image: "image-standard".to_string(),
            video: "video-standard".to_string(),
            music: "music-standard".to_string(),
        }
    }
}

impl ModelsConfig {
    /// Model preferences seeded from these defaults.
    pub fn preferences(&self) -> ModelPreferences {
        ModelPreferences::default()
            .with_text_model(self.text.as_str())
            .with_image_model(self.image.as_str())
            .with_video_model(self.video.as_str())
            .with_music_model(self.music.as_str())
    }
}

/// Two-tier video price per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct VideoPrice {
    /// Price per second for silent clips
    pub low: f64,
    /// Price per second for clips with generated audio
    pub high: f64,
}

/// Per-model price tables.
///
/// ```toml
/// [pricing]
/// currency_factor = 1.0
/// retry_margin = 0.25
///
/// [pricing.text]
/// script-standard = 0.002
///
/// [pricing.video.video-standard]
/// low = 0.05
/// high = 0.10
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Multiplier from base prices to the display currency
    pub currency_factor: f64,
    /// Fractional headroom for retried calls in the high estimate
    pub retry_margin: f64,
    /// Price per text call, by model key
    pub text: HashMap<String, f64>,
    /// Price per image, by model key
    pub image: HashMap<String, f64>,
    /// Price per clip second, by model key
    pub video: HashMap<String, VideoPrice>,
    /// Price per music second, by model key
    pub music: HashMap<String, f64>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency_factor: 1.0,
            retry_margin: 0.25,
            text: HashMap::new(),
            image: HashMap::new(),
            video: HashMap::new(),
            music: HashMap::new(),
        }
    }
}

/// Draft history settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Quiet period after the last edit before an autosave runs
    pub autosave_quiet_ms: u64,
    /// Maximum number of archived drafts
    pub archive_cap: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            autosave_quiet_ms: 1500,
            archive_cap: 50,
        }
    }
}

impl HistoryConfig {
    /// Autosave quiet period.
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.autosave_quiet_ms)
    }
}

/// HTTP invoker settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InvokerConfig {
    /// Base URL of the generation service
    pub endpoint: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Environment variable holding the credential
    pub api_key_env: String,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8787".to_string(),
            timeout_secs: 180,
            api_key_env: "SCENECRAFT_API_KEY".to_string(),
        }
    }
}

impl InvokerConfig {
    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the credential from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns a `MissingCredential` pipeline error when the variable is
    /// unset or blank.
    pub fn api_key(&self) -> ScenecraftResult<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(PipelineError::new(PipelineErrorKind::MissingCredential(
                self.api_key_env.clone(),
            ))
            .into()),
        }
    }
}

/// Top-level SceneCraft configuration.
///
/// # Example
///
/// ```no_run
/// use scenecraft_invoke::ScenecraftConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScenecraftConfig::load()?;
/// println!("clip cap: {}s", config.planner.clip_seconds);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScenecraftConfig {
    /// Retry schedule
    pub retry: RetryConfig,
    /// Scene planner
    pub planner: PlannerConfig,
    /// Default models
    pub models: ModelsConfig,
    /// Price tables
    pub pricing: PricingConfig,
    /// Draft history
    pub history: HistoryConfig,
    /// HTTP invoker
    pub invoker: InvokerConfig,
}

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../scenecraft.toml");

impl ScenecraftConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ScenecraftResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ScenecraftError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ScenecraftError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse.
    pub fn bundled() -> ScenecraftResult<Self> {
        Self::build(Self::defaults())
    }

    /// Load configuration with precedence: current dir > home dir > bundled.
    ///
    /// User config files are optional and skipped when absent.
    #[instrument]
    pub fn load() -> ScenecraftResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/scenecraft/scenecraft.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("scenecraft").required(false));

        Self::build(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> ScenecraftResult<Self> {
        builder
            .build()
            .map_err(|e| {
                ScenecraftError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ScenecraftError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
