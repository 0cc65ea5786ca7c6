//! Reusable characters and per-draft character selections.

use serde::{Deserialize, Serialize};

/// Narrative role of a character.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CharacterRole {
    /// Main character and consistency anchor
    Protagonist,
    /// Supporting character
    Supporting,
    /// Antagonist
    Antagonist,
    /// Background extra
    Extra,
    /// Anything else
    #[default]
    Other,
}

/// A character record owned by the character registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Registry identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Narrative role
    #[serde(default)]
    pub role: CharacterRole,
    /// Free-text physical appearance
    #[serde(default)]
    pub appearance: String,
    /// Free-text clothing description
    #[serde(default)]
    pub clothing: String,
    /// Free-text personality description
    #[serde(default)]
    pub personality: String,
    /// Uploaded reference image URLs
    #[serde(default)]
    pub reference_images: Vec<String>,
    /// AI-generated image URLs
    #[serde(default)]
    pub generated_images: Vec<String>,
}

/// Where a character's reference images come from for a draft.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ImageSourceMode {
    /// Pass the attached images as-is
    #[default]
    UseAttached,
    /// Pass the attached images as loose references for the model
    AiReference,
    /// Ignore attached images and let the model invent a new look
    GenerateNew,
}

/// A character chosen for a draft, with its image-source mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSelection {
    /// Registry identifier
    pub character_id: String,
    /// Image-source mode for this draft
    #[serde(default)]
    pub mode: ImageSourceMode,
}

impl CharacterSelection {
    /// Select a character with the default image-source mode.
    pub fn new(character_id: impl Into<String>) -> Self {
        Self {
            character_id: character_id.into(),
            mode: ImageSourceMode::default(),
        }
    }

    /// Select a character with an explicit image-source mode.
    pub fn with_mode(character_id: impl Into<String>, mode: ImageSourceMode) -> Self {
        Self {
            character_id: character_id.into(),
            mode,
        }
    }
}
