//! Script stage: turning a topic into per-scene prompts.
//!
//! The text model is asked for a JSON array with one object per planned
//! scene. Parsing tolerates prose or a fenced code block around the array.

use crate::{CharacterSlots, planned_seconds};
use scenecraft_core::{FramePosition, Scene, TopicDraft};
use scenecraft_error::{PipelineError, PipelineErrorKind};
use scenecraft_style::{Dimension, compose_style_guide, duration_entry, lookup};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::{debug, instrument};

/// Prompts for one scene as returned by the script model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptScene {
    /// Opening frame
    pub start: String,
    /// Optional middle frame
    #[serde(default)]
    pub mid: Option<String>,
    /// Closing frame
    pub end: String,
    /// Motion between the frames
    pub motion: String,
    /// Optional spoken line for the clip
    #[serde(default)]
    pub dialogue: Option<String>,
}

/// Spoken lines for one scene, as returned by the dialogue pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DialogueLines {
    /// Line over the opening frame
    #[serde(default)]
    pub start: Option<String>,
    /// Line over the middle frame
    #[serde(default)]
    pub mid: Option<String>,
    /// Line over the closing frame
    #[serde(default)]
    pub end: Option<String>,
}

impl DialogueLines {
    fn into_map(self) -> BTreeMap<FramePosition, String> {
        [
            (FramePosition::Start, self.start),
            (FramePosition::Mid, self.mid),
            (FramePosition::End, self.end),
        ]
        .into_iter()
        .filter_map(|(position, line)| {
            line.map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .map(|l| (position, l))
        })
        .collect()
    }
}

/// Prompt for the script call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    prompt: String,
    scene_count: usize,
}

impl ScriptRequest {
    /// Build the script prompt for a draft's planned scenes.
    pub fn new(draft: &TopicDraft, slots: &CharacterSlots, clip_seconds: u32) -> Self {
        let mut prompt = String::new();
        let scene_count = draft.scenes.len();
        let duration = duration_entry(&draft.style.duration);
        // A pinned plan no longer matches the catalog length
        let length = if scene_count == crate::scene_count(duration.seconds, clip_seconds, None) {
            duration.entry.description.to_string()
        } else {
            format!("a {}-second short", planned_seconds(scene_count, clip_seconds))
        };

        let _ = writeln!(
            prompt,
            "Write a shot-by-shot script for {} about: {}",
            length,
            draft.topic.trim()
        );

        let context = &draft.context;
        for (label, value) in [
            ("Background", &context.background),
            ("Mood", &context.mood_note),
            ("Scene notes", &context.scene_note),
            ("Special instructions", &context.special_instructions),
        ] {
            if !value.trim().is_empty() {
                let _ = writeln!(prompt, "{}: {}", label, value.trim());
            }
        }

        prompt.push('\n');
        prompt.push_str(&compose_style_guide(&draft.style));

        if !slots.is_empty() {
            prompt.push('\n');
            prompt.push_str(slots.instruction_block());
        }
        if !slots.unslotted().is_empty() {
            prompt.push_str("\nCHARACTERS WITHOUT REFERENCE IMAGES\n");
            for character in slots.unslotted() {
                let _ = writeln!(
                    prompt,
                    "- {} ({}): {} {}",
                    character.name,
                    character.role,
                    character.appearance.trim(),
                    character.clothing.trim()
                );
            }
        }

        let _ = writeln!(prompt, "\nSCENES ({} total, {} seconds each)", scene_count, clip_seconds);
        for scene in &draft.scenes {
            let settings = &scene.settings;
            let _ = writeln!(
                prompt,
                "{}. {}, {}, {}, {} pacing, {} transition",
                scene.index + 1,
                lookup(Dimension::ShotSize, &settings.shot_size).label,
                lookup(Dimension::CameraAngle, &settings.camera_angle).label,
                lookup(Dimension::CameraMovement, &settings.camera_movement).label,
                lookup(Dimension::Pacing, &settings.pacing).label,
                lookup(Dimension::TransitionStyle, &settings.transition_style).label,
            );
        }

        let _ = write!(
            prompt,
            "\nRespond with only a JSON array of exactly {} objects, one per scene in order, \
             each with the keys \"start\" (opening frame), optional \"mid\" (middle frame), \
             \"end\" (closing frame), \"motion\" (what moves between the frames) and optional \
             \"dialogue\" (one spoken line). Describe what is seen; do not repeat the style guide.",
            scene_count
        );

        Self {
            prompt,
            scene_count,
        }
    }

    /// Prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Number of scenes requested.
    pub fn scene_count(&self) -> usize {
        self.scene_count
    }
}

/// Prompt for the optional dialogue pass.
pub fn dialogue_prompt(draft: &TopicDraft) -> String {
    let narration = &draft.audio.narration;
    let mut prompt = format!(
        "Write spoken narration for a short video about: {}\nVoice: {}. Language: {}.\n\nSCENES\n",
        draft.topic.trim(),
        narration.voice,
        narration.language
    );
    for scene in &draft.scenes {
        let _ = writeln!(
            prompt,
            "{}. {} -> {}",
            scene.index + 1,
            scene.start_prompt.trim(),
            scene.end_prompt.trim()
        );
    }
    let _ = write!(
        prompt,
        "\nRespond with only a JSON array of exactly {} objects, one per scene in order, \
         with optional keys \"start\", \"mid\" and \"end\" holding the line spoken over that frame.",
        draft.scenes.len()
    );
    prompt
}

/// Extract the JSON array from model text.
///
/// Prefers a fenced code block; falls back to the span from the first `[`
/// to the last `]`.
fn extract_array(text: &str) -> Option<&str> {
    if let Some(open) = text.find("```") {
        let after = &text[open + 3..];
        let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after[body_start..];
        if let Some(close) = body.find("```") {
            let fenced = body[..close].trim();
            if fenced.starts_with('[') {
                return Some(fenced);
            }
        }
    }
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_array<T: for<'de> Deserialize<'de>>(
    text: &str,
    expected: usize,
) -> Result<Vec<T>, PipelineError> {
    let json = extract_array(text).ok_or_else(|| {
        PipelineError::new(PipelineErrorKind::MalformedScript(
            "no JSON array in response".to_string(),
        ))
    })?;
    let items: Vec<T> = serde_json::from_str(json)
        .map_err(|e| PipelineError::new(PipelineErrorKind::MalformedScript(e.to_string())))?;
    if items.len() != expected {
        return Err(PipelineError::new(PipelineErrorKind::ScriptCountMismatch {
            returned: items.len(),
            expected,
        }));
    }
    Ok(items)
}

/// Parse a script response with one entry per planned scene.
///
/// # Errors
///
/// Returns `MalformedScript` when no JSON array can be decoded and
/// `ScriptCountMismatch` when the count differs from the plan.
#[instrument(skip(text), fields(len = text.len()))]
pub fn parse_script(text: &str, expected: usize) -> Result<Vec<ScriptScene>, PipelineError> {
    let scenes: Vec<ScriptScene> = parse_array(text, expected)?;
    debug!(count = scenes.len(), "Parsed script");
    Ok(scenes)
}

/// Parse a dialogue-pass response.
///
/// # Errors
///
/// Same as [`parse_script`].
pub fn parse_dialogue(text: &str, expected: usize) -> Result<Vec<DialogueLines>, PipelineError> {
    parse_array(text, expected)
}

/// Write script prompts into scenes by index. Settings are left untouched.
pub fn apply_script(scenes: &mut [Scene], script: Vec<ScriptScene>) {
    for (scene, entry) in scenes.iter_mut().zip(script) {
        scene.start_prompt = entry.start.trim().to_string();
        scene.mid_prompt = entry
            .mid
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        scene.end_prompt = entry.end.trim().to_string();
        scene.motion_prompt = entry.motion.trim().to_string();
        scene.dialogue.clear();
        if let Some(line) = entry.dialogue.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()) {
            scene.dialogue.insert(FramePosition::Start, line);
        }
    }
}

/// Replace scene dialogue with dialogue-pass lines, by index.
pub fn apply_dialogue(scenes: &mut [Scene], lines: Vec<DialogueLines>) {
    for (scene, lines) in scenes.iter_mut().zip(lines) {
        scene.dialogue = lines.into_map();
    }
}
