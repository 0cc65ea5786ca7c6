//! Taxonomy dimensions and lookups.

use crate::tables;
use scenecraft_core::StyleSelection;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

/// Version of the taxonomy tables.
///
/// Bump when entries are added, removed or their descriptions change in a
/// way that alters generated prompts.
pub const TAXONOMY_VERSION: u32 = 3;

/// One enumerated style dimension.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Dimension {
    /// Story genre
    Genre,
    /// Emotional mood
    Mood,
    /// Visual rendering style
    VisualStyle,
    /// Lighting setup
    Lighting,
    /// Camera angle
    CameraAngle,
    /// Shot size
    ShotSize,
    /// Camera movement
    CameraMovement,
    /// Pacing
    Pacing,
    /// Transition between scenes
    TransitionStyle,
    /// Color grade
    ColorGrade,
    /// Time of day
    TimeSetting,
    /// Weather
    WeatherSetting,
    /// Output format (aspect ratio)
    OutputFormat,
    /// Target duration
    Duration,
}

impl Dimension {
    /// Dimensions describing motion over time; only the video prompt uses them.
    pub fn is_motion(self) -> bool {
        matches!(
            self,
            Dimension::CameraMovement | Dimension::Pacing | Dimension::TransitionStyle
        )
    }

    /// Dimensions describing a still composition; only the image prompt uses them.
    pub fn is_composition(self) -> bool {
        matches!(
            self,
            Dimension::VisualStyle
                | Dimension::Lighting
                | Dimension::CameraAngle
                | Dimension::ShotSize
                | Dimension::ColorGrade
                | Dimension::TimeSetting
                | Dimension::WeatherSetting
        )
    }

    /// Dimensions copied into every new scene's settings.
    pub fn is_per_scene(self) -> bool {
        matches!(
            self,
            Dimension::CameraAngle
                | Dimension::ShotSize
                | Dimension::CameraMovement
                | Dimension::Pacing
                | Dimension::TransitionStyle
        )
    }

    /// Per-scene dimensions, in catalog order.
    pub fn iter_per_scene() -> impl Iterator<Item = Dimension> {
        Dimension::iter().filter(|d| d.is_per_scene())
    }

    /// Whether a free-text override is accepted for this dimension.
    pub fn supports_custom(self) -> bool {
        matches!(self, Dimension::Genre | Dimension::Mood)
    }

    /// Human-readable heading.
    pub fn title(self) -> &'static str {
        match self {
            Dimension::Genre => "Genre",
            Dimension::Mood => "Mood",
            Dimension::VisualStyle => "Visual Style",
            Dimension::Lighting => "Lighting",
            Dimension::CameraAngle => "Camera Angle",
            Dimension::ShotSize => "Shot Size",
            Dimension::CameraMovement => "Camera Movement",
            Dimension::Pacing => "Pacing",
            Dimension::TransitionStyle => "Transition",
            Dimension::ColorGrade => "Color Grade",
            Dimension::TimeSetting => "Time of Day",
            Dimension::WeatherSetting => "Weather",
            Dimension::OutputFormat => "Output Format",
            Dimension::Duration => "Duration",
        }
    }

    /// Identifier selected for this dimension.
    pub fn selected(self, style: &StyleSelection) -> &str {
        match self {
            Dimension::Genre => &style.genre,
            Dimension::Mood => &style.mood,
            Dimension::VisualStyle => &style.visual_style,
            Dimension::Lighting => &style.lighting,
            Dimension::CameraAngle => &style.camera_angle,
            Dimension::ShotSize => &style.shot_size,
            Dimension::CameraMovement => &style.camera_movement,
            Dimension::Pacing => &style.pacing,
            Dimension::TransitionStyle => &style.transition_style,
            Dimension::ColorGrade => &style.color_grade,
            Dimension::TimeSetting => &style.time_setting,
            Dimension::WeatherSetting => &style.weather_setting,
            Dimension::OutputFormat => &style.output_format,
            Dimension::Duration => &style.duration,
        }
    }

    fn selected_mut(self, style: &mut StyleSelection) -> &mut String {
        match self {
            Dimension::Genre => &mut style.genre,
            Dimension::Mood => &mut style.mood,
            Dimension::VisualStyle => &mut style.visual_style,
            Dimension::Lighting => &mut style.lighting,
            Dimension::CameraAngle => &mut style.camera_angle,
            Dimension::ShotSize => &mut style.shot_size,
            Dimension::CameraMovement => &mut style.camera_movement,
            Dimension::Pacing => &mut style.pacing,
            Dimension::TransitionStyle => &mut style.transition_style,
            Dimension::ColorGrade => &mut style.color_grade,
            Dimension::TimeSetting => &mut style.time_setting,
            Dimension::WeatherSetting => &mut style.weather_setting,
            Dimension::OutputFormat => &mut style.output_format,
            Dimension::Duration => &mut style.duration,
        }
    }
}

/// One taxonomy entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StyleEntry {
    /// Stable identifier stored in drafts
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    /// Display icon
    pub icon: &'static str,
    /// Prompt text for this entry
    pub description: &'static str,
}

/// Output format entry with its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatEntry {
    /// Taxonomy entry
    pub entry: &'static StyleEntry,
    /// Aspect ratio passed to generation calls, e.g. "16:9"
    pub aspect_ratio: &'static str,
}

/// Duration entry with its length in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationEntry {
    /// Taxonomy entry
    pub entry: &'static StyleEntry,
    /// Target length of the finished video
    pub seconds: u32,
}

/// All entries of a dimension. The first entry is the dimension's fallback.
pub fn catalog(dimension: Dimension) -> &'static [StyleEntry] {
    match dimension {
        Dimension::Genre => tables::GENRES,
        Dimension::Mood => tables::MOODS,
        Dimension::VisualStyle => tables::VISUAL_STYLES,
        Dimension::Lighting => tables::LIGHTING,
        Dimension::CameraAngle => tables::CAMERA_ANGLES,
        Dimension::ShotSize => tables::SHOT_SIZES,
        Dimension::CameraMovement => tables::CAMERA_MOVEMENTS,
        Dimension::Pacing => tables::PACING,
        Dimension::TransitionStyle => tables::TRANSITIONS,
        Dimension::ColorGrade => tables::COLOR_GRADES,
        Dimension::TimeSetting => tables::TIME_SETTINGS,
        Dimension::WeatherSetting => tables::WEATHER_SETTINGS,
        Dimension::OutputFormat => tables::OUTPUT_FORMATS,
        Dimension::Duration => tables::DURATIONS,
    }
}

/// Whether `id` names an entry of `dimension`.
pub fn is_known(dimension: Dimension, id: &str) -> bool {
    catalog(dimension).iter().any(|e| e.id == id)
}

/// Resolve an identifier, falling back to the dimension's first entry.
///
/// Unknown identifiers (removed entries, typos in hand-edited drafts) never
/// fail; they resolve to the fallback so existing drafts keep composing.
pub fn lookup(dimension: Dimension, id: &str) -> &'static StyleEntry {
    let entries = catalog(dimension);
    match entries.iter().find(|e| e.id == id) {
        Some(entry) => entry,
        None => {
            debug!(%dimension, id, fallback = entries[0].id, "Unknown style id, using fallback");
            &entries[0]
        }
    }
}

/// Resolve an output format identifier with its aspect ratio.
pub fn format_entry(id: &str) -> FormatEntry {
    let entry = lookup(Dimension::OutputFormat, id);
    let aspect_ratio = tables::ASPECT_RATIOS
        .iter()
        .find(|(format, _)| *format == entry.id)
        .map(|(_, ratio)| *ratio)
        .unwrap_or("16:9");
    FormatEntry {
        entry,
        aspect_ratio,
    }
}

/// Resolve a duration identifier with its length in seconds.
pub fn duration_entry(id: &str) -> DurationEntry {
    let entry = lookup(Dimension::Duration, id);
    let seconds = tables::DURATION_SECONDS
        .iter()
        .find(|(duration, _)| *duration == entry.id)
        .map(|(_, seconds)| *seconds)
        .unwrap_or(30);
    DurationEntry { entry, seconds }
}

/// Replace unknown identifiers with their fallback ids.
///
/// Returns the dimensions that were rewritten.
pub fn normalize_selection(style: &mut StyleSelection) -> Vec<Dimension> {
    let mut replaced = Vec::new();
    for dimension in Dimension::iter() {
        let slot = dimension.selected_mut(style);
        if !is_known(dimension, slot) {
            *slot = catalog(dimension)[0].id.to_string();
            replaced.push(dimension);
        }
    }
    replaced
}
