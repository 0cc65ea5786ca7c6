//! The draft aggregate.

use crate::{
    AudioOptions, CharacterSelection, GeneratedClip, GeneratedFrame, Scene, StyleSelection,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Normalize topic text for merge-by-text matching.
///
/// Trims, lowercases and collapses internal whitespace runs to one space.
///
/// # Examples
///
/// ```
/// use scenecraft_core::normalize_topic;
///
/// assert_eq!(normalize_topic("  A  Lighthouse\tKeeper "), "a lighthouse keeper");
/// ```
pub fn normalize_topic(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Free-text context fields that accompany the topic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftContext {
    /// Background and setting
    pub background: String,
    /// Mood note
    pub mood_note: String,
    /// Scene note
    pub scene_note: String,
    /// Special instructions
    pub special_instructions: String,
}

impl DraftContext {
    /// True when every field is blank.
    pub fn is_empty(&self) -> bool {
        [
            &self.background,
            &self.mood_note,
            &self.scene_note,
            &self.special_instructions,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}

/// The in-progress or archived draft of one topic.
///
/// A draft without `id` is matched by its normalized topic text when
/// autosaved. Once an identity is assigned (explicit save or "new topic"),
/// the draft is always stored under that identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDraft {
    /// Stable identity, assigned on explicit save or "new topic"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Topic text
    pub topic: String,
    /// Context fields
    #[serde(default)]
    pub context: DraftContext,
    /// Global style selection
    #[serde(default)]
    pub style: StyleSelection,
    /// Selected characters, in selection order
    #[serde(default)]
    pub characters: Vec<CharacterSelection>,
    /// Audio toggles
    #[serde(default)]
    pub audio: AudioOptions,
    /// Planned scenes, ordered by index
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// Generated frames, one entry per scene that has images
    #[serde(default)]
    pub frames: Vec<GeneratedFrame>,
    /// Generated clips, one entry per scene that has a clip
    #[serde(default)]
    pub clips: Vec<GeneratedClip>,
    /// Background music track URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_url: Option<String>,
    /// Favorite flag
    #[serde(default)]
    pub favorite: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl TopicDraft {
    /// Create an unidentified draft for a topic.
    pub fn new(topic: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            topic: topic.into(),
            context: DraftContext::default(),
            style: StyleSelection::default(),
            characters: Vec::new(),
            audio: AudioOptions::default(),
            scenes: Vec::new(),
            frames: Vec::new(),
            clips: Vec::new(),
            music_url: None,
            favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a draft with a stable identity assigned immediately.
    pub fn with_identity(topic: impl Into<String>) -> Self {
        let mut draft = Self::new(topic);
        draft.id = Some(Uuid::new_v4());
        draft
    }

    /// Normalized topic text.
    pub fn normalized_topic(&self) -> String {
        normalize_topic(&self.topic)
    }

    /// Whether the topic text is blank.
    pub fn has_topic(&self) -> bool {
        !self.topic.trim().is_empty()
    }

    /// Bump the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Frames recorded for a scene.
    pub fn frame(&self, scene_index: usize) -> Option<&GeneratedFrame> {
        self.frames.iter().find(|f| *f.scene_index() == scene_index)
    }

    /// Clip recorded for a scene.
    pub fn clip(&self, scene_index: usize) -> Option<&GeneratedClip> {
        self.clips.iter().find(|c| c.scene_index == scene_index)
    }

    /// Replace the frames of a scene, keeping `frames` ordered by scene.
    pub fn put_frame(&mut self, frame: GeneratedFrame) {
        let index = *frame.scene_index();
        match self
            .frames
            .binary_search_by_key(&index, |f| *f.scene_index())
        {
            Ok(i) => self.frames[i] = frame,
            Err(i) => self.frames.insert(i, frame),
        }
    }

    /// Replace the clip of a scene, keeping `clips` ordered by scene.
    pub fn put_clip(&mut self, clip: GeneratedClip) {
        match self
            .clips
            .binary_search_by_key(&clip.scene_index, |c| c.scene_index)
        {
            Ok(i) => self.clips[i] = clip,
            Err(i) => self.clips.insert(i, clip),
        }
    }

    /// Drop frames and clips of scenes that no longer exist.
    pub fn prune_outputs(&mut self) {
        let count = self.scenes.len();
        self.frames.retain(|f| *f.scene_index() < count);
        self.clips.retain(|c| c.scene_index < count);
    }
}
