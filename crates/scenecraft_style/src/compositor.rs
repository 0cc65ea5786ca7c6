//! Prompt composition.
//!
//! Still-image calls only receive composition attributes and motion calls
//! only receive motion attributes. The two models interpret time
//! differently, so a pacing hint in an image prompt (or a color grade in a
//! motion prompt) is noise at best.

use crate::{Dimension, duration_entry, format_entry, lookup};
use scenecraft_core::{FramePosition, Scene, SceneSettings, StyleSelection};
use std::fmt::Write;

/// Dimensions of the image block, in output order.
const IMAGE_DIMENSIONS: [Dimension; 7] = [
    Dimension::VisualStyle,
    Dimension::Lighting,
    Dimension::TimeSetting,
    Dimension::WeatherSetting,
    Dimension::ColorGrade,
    Dimension::CameraAngle,
    Dimension::ShotSize,
];

/// Dimensions of the video block, in output order.
const VIDEO_DIMENSIONS: [Dimension; 3] = [
    Dimension::CameraMovement,
    Dimension::TransitionStyle,
    Dimension::Pacing,
];

/// Identifier in effect for a dimension: scene settings win for per-scene
/// dimensions, the global selection for everything else.
fn effective_id<'a>(
    dimension: Dimension,
    style: &'a StyleSelection,
    settings: &'a SceneSettings,
) -> &'a str {
    match dimension {
        Dimension::CameraAngle => &settings.camera_angle,
        Dimension::ShotSize => &settings.shot_size,
        Dimension::CameraMovement => &settings.camera_movement,
        Dimension::Pacing => &settings.pacing,
        Dimension::TransitionStyle => &settings.transition_style,
        other => other.selected(style),
    }
}

fn block(dimensions: &[Dimension], style: &StyleSelection, settings: &SceneSettings) -> Vec<String> {
    dimensions
        .iter()
        .map(|dimension| {
            let entry = lookup(*dimension, effective_id(*dimension, style, settings));
            format!("{}: {}.", dimension.title(), entry.description)
        })
        .collect()
}

/// Static block for still-image generation.
///
/// Visual style, lighting, time of day, weather, color grade, camera angle,
/// shot size and aspect-ratio framing. Never mentions motion.
///
/// # Examples
///
/// ```
/// use scenecraft_core::StyleSelection;
/// use scenecraft_style::compose_image_prompt;
///
/// let style = StyleSelection::default();
/// let text = compose_image_prompt(&style, &style.scene_defaults());
/// assert!(text.contains("16:9"));
/// ```
pub fn compose_image_prompt(style: &StyleSelection, settings: &SceneSettings) -> String {
    let mut lines = block(&IMAGE_DIMENSIONS, style, settings);
    let format = format_entry(&style.output_format);
    lines.push(format!(
        "Framing: {}, {} aspect ratio.",
        format.entry.description, format.aspect_ratio
    ));
    lines.join("\n")
}

/// Dynamic block for motion generation: camera movement, transition, pacing.
pub fn compose_video_prompt(style: &StyleSelection, settings: &SceneSettings) -> String {
    block(&VIDEO_DIMENSIONS, style, settings).join("\n")
}

fn guide_section(out: &mut String, heading: &str, label: &str, description: &str) {
    let _ = write!(out, "\n## {}\n{} - {}\n", heading, label, description);
}

/// Long-form style guide used to ground the script model.
///
/// Custom genre and mood text replace the catalog entries when set.
pub fn compose_style_guide(style: &StyleSelection) -> String {
    let mut out = String::from("# Style Guide\n");

    match style.custom_genre() {
        Some(custom) => guide_section(&mut out, Dimension::Genre.title(), "Custom", custom),
        None => {
            let entry = lookup(Dimension::Genre, &style.genre);
            guide_section(&mut out, Dimension::Genre.title(), entry.label, entry.description);
        }
    }
    match style.custom_mood() {
        Some(custom) => guide_section(&mut out, Dimension::Mood.title(), "Custom", custom),
        None => {
            let entry = lookup(Dimension::Mood, &style.mood);
            guide_section(&mut out, Dimension::Mood.title(), entry.label, entry.description);
        }
    }

    for dimension in [
        Dimension::VisualStyle,
        Dimension::Lighting,
        Dimension::ColorGrade,
        Dimension::TimeSetting,
        Dimension::WeatherSetting,
    ] {
        let entry = lookup(dimension, dimension.selected(style));
        guide_section(&mut out, dimension.title(), entry.label, entry.description);
    }

    let format = format_entry(&style.output_format);
    guide_section(
        &mut out,
        Dimension::OutputFormat.title(),
        format.entry.label,
        format.entry.description,
    );
    let duration = duration_entry(&style.duration);
    guide_section(
        &mut out,
        Dimension::Duration.title(),
        duration.entry.label,
        duration.entry.description,
    );

    out.push_str("\n## Default Camera Language\n");
    for dimension in Dimension::iter_per_scene() {
        let entry = lookup(dimension, dimension.selected(style));
        let _ = writeln!(
            out,
            "- {}: {} - {}",
            dimension.title(),
            entry.label,
            entry.description
        );
    }
    out
}

/// Full still-frame prompt: scene text, static block, character block.
pub fn compose_frame_prompt(
    scene_prompt: &str,
    style: &StyleSelection,
    settings: &SceneSettings,
    character_block: &str,
) -> String {
    let mut prompt = format!(
        "{}\n\n{}",
        scene_prompt.trim(),
        compose_image_prompt(style, settings)
    );
    if !character_block.trim().is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(character_block.trim());
    }
    prompt
}

/// Full motion prompt: motion text, dynamic block, clip length and dialogue.
pub fn compose_motion_prompt(
    scene: &Scene,
    style: &StyleSelection,
    clip_seconds: Option<u32>,
) -> String {
    let mut prompt = format!(
        "{}\n\n{}",
        scene.motion_prompt.trim(),
        compose_video_prompt(style, &scene.settings)
    );
    if let Some(seconds) = clip_seconds {
        let _ = write!(prompt, "\nClip length: {} seconds.", seconds);
    }
    let lines: Vec<(FramePosition, &str)> = scene
        .dialogue
        .iter()
        .map(|(position, line)| (*position, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();
    if !lines.is_empty() {
        prompt.push_str("\n\nDialogue:");
        for (position, line) in lines {
            let _ = write!(prompt, "\n- ({}) \"{}\"", position, line);
        }
    }
    prompt
}
