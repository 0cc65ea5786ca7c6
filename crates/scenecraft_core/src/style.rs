//! Global style selection and per-scene settings.

use serde::{Deserialize, Serialize};

/// One taxonomy identifier per style dimension, plus free-text overrides.
///
/// Identifiers are resolved against the taxonomy tables in `scenecraft_style`;
/// unknown identifiers fall back to the dimension's default entry rather than
/// failing, so stale drafts always load.
///
/// # Examples
///
/// ```
/// use scenecraft_core::StyleSelection;
///
/// let style = StyleSelection::default();
/// let settings = style.scene_defaults();
/// assert_eq!(settings.camera_movement, style.camera_movement);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSelection {
    /// Genre identifier
    pub genre: String,
    /// Mood identifier
    pub mood: String,
    /// Visual rendering style identifier
    pub visual_style: String,
    /// Lighting identifier
    pub lighting: String,
    /// Default camera angle identifier
    pub camera_angle: String,
    /// Default shot size identifier
    pub shot_size: String,
    /// Default camera movement identifier
    pub camera_movement: String,
    /// Default pacing identifier
    pub pacing: String,
    /// Default transition identifier
    pub transition_style: String,
    /// Color grade identifier
    pub color_grade: String,
    /// Time-of-day identifier
    pub time_setting: String,
    /// Weather identifier
    pub weather_setting: String,
    /// Output format (aspect ratio) identifier
    pub output_format: String,
    /// Target duration identifier
    pub duration: String,
    /// Free-text genre override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_genre: Option<String>,
    /// Free-text mood override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_mood: Option<String>,
}

impl Default for StyleSelection {
    fn default() -> Self {
        Self {
            genre: "drama".to_string(),
            mood: "uplifting".to_string(),
            visual_style: "cinematic".to_string(),
            lighting: "natural".to_string(),
            camera_angle: "eye-level".to_string(),
            shot_size: "medium".to_string(),
            camera_movement: "static".to_string(),
            pacing: "moderate".to_string(),
            transition_style: "cut".to_string(),
            color_grade: "neutral".to_string(),
            time_setting: "midday".to_string(),
            weather_setting: "clear".to_string(),
            output_format: "landscape".to_string(),
            duration: "30s".to_string(),
            custom_genre: None,
            custom_mood: None,
        }
    }
}

impl StyleSelection {
    /// Snapshot of the dynamic dimensions for a newly planned scene.
    ///
    /// The returned settings are an owned copy; later edits to the global
    /// selection do not reach scenes planned before the edit.
    pub fn scene_defaults(&self) -> SceneSettings {
        SceneSettings {
            camera_angle: self.camera_angle.clone(),
            shot_size: self.shot_size.clone(),
            camera_movement: self.camera_movement.clone(),
            pacing: self.pacing.clone(),
            transition_style: self.transition_style.clone(),
        }
    }

    /// Custom genre text, if set and non-blank.
    pub fn custom_genre(&self) -> Option<&str> {
        self.custom_genre
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Custom mood text, if set and non-blank.
    pub fn custom_mood(&self) -> Option<&str> {
        self.custom_mood
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Camera and pacing configuration scoped to one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Camera angle identifier
    pub camera_angle: String,
    /// Shot size identifier
    pub shot_size: String,
    /// Camera movement identifier
    pub camera_movement: String,
    /// Pacing identifier
    pub pacing: String,
    /// Transition identifier
    pub transition_style: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        StyleSelection::default().scene_defaults()
    }
}
