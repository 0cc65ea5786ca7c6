//! Cached model-selection preferences.

use crate::GenerationKind;
use serde::{Deserialize, Serialize};

/// Model key per generation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct ModelPreferences {
    /// Text (script) model key
    text_model: String,
    /// Still image model key
    image_model: String,
    /// Video clip model key
    video_model: String,
    /// Music model key
    music_model: String,
}

impl Default for ModelPreferences {
    fn default() -> Self {
        Self {
            text_model: "script-standard".to_string(),
            image_model: "image-standard".to_string(),
            video_model: "video-standard".to_string(),
            music_model: "music-standard".to_string(),
        }
    }
}

impl ModelPreferences {
    /// Model key for a generation kind.
    pub fn model_for(&self, kind: GenerationKind) -> &str {
        match kind {
            GenerationKind::Text => &self.text_model,
            GenerationKind::Image => &self.image_model,
            GenerationKind::Video => &self.video_model,
            GenerationKind::Music => &self.music_model,
        }
    }
}
