//! Audio feature toggles.

use serde::{Deserialize, Serialize};

/// Background music settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicOptions {
    /// Generate a background music track
    pub enabled: bool,
    /// Musical style, e.g. "orchestral"
    pub style: String,
    /// Musical mood, e.g. "hopeful"
    pub mood: String,
}

/// Sound effect settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundEffectOptions {
    /// Generate ambient and foley sound with each clip
    pub enabled: bool,
    /// Sound design style, e.g. "realistic"
    pub style: String,
}

/// Narration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationOptions {
    /// Generate spoken narration or dialogue
    pub enabled: bool,
    /// Voice name
    pub voice: String,
    /// BCP-47 language tag
    pub language: String,
}

impl Default for NarrationOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            voice: "neutral".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Independent audio toggles for a draft.
///
/// Sub-parameters are only read when their toggle is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioOptions {
    /// Background music
    pub music: MusicOptions,
    /// Sound effects
    pub sound_effects: SoundEffectOptions,
    /// Narration
    pub narration: NarrationOptions,
}

impl AudioOptions {
    /// Whether video clips carry their own audio track.
    pub fn clips_have_audio(&self) -> bool {
        self.narration.enabled || self.sound_effects.enabled
    }
}
