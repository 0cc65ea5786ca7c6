//! Draft session: the in-progress draft and its model preferences.
//!
//! The session is the only owner of the current [`TopicDraft`]. Every edit
//! goes through a method here, is applied synchronously and bumps
//! `updated_at`, so an autosave scheduled afterwards always sees the latest
//! state.

use crate::{
    Autosaver, DialogueLines, DraftHistory, SceneOutcome, ScriptScene, apply_dialogue,
    apply_script, replan, scene_count,
};
use derive_getters::Getters;
use scenecraft_core::{
    AudioOptions, CharacterSelection, DraftContext, ModelPreferences, SceneSettings,
    StyleSelection, TopicDraft,
};
use scenecraft_error::{
    PipelineError, PipelineErrorKind, ScenecraftResult, StorageError, StorageErrorKind,
};
use scenecraft_invoke::ScenecraftConfig;
use scenecraft_style::{duration_entry, normalize_selection};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Which prompt of a scene to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PromptField {
    /// Start frame
    Start,
    /// Optional mid frame; an empty text clears it
    Mid,
    /// End frame
    End,
    /// Motion between frames
    Motion,
}

/// The in-progress draft plus cached model preferences.
#[derive(Debug, Clone, Getters)]
pub struct DraftSession {
    /// Current draft
    draft: TopicDraft,
    /// Models used for generation
    preferences: ModelPreferences,
    /// Per-clip cap in seconds
    clip_seconds: u32,
}

impl DraftSession {
    /// Empty session using configured models and clip length.
    pub fn init(config: &ScenecraftConfig) -> Self {
        let mut session = Self {
            draft: TopicDraft::new(""),
            preferences: config.models.preferences(),
            clip_seconds: config.planner.clip_seconds.max(1),
        };
        session.replan(None);
        session
    }

    /// Start a new draft for `topic` with a fresh stable identity.
    ///
    /// # Errors
    ///
    /// Fails with `EmptyTopic` for blank topic text.
    #[instrument(skip(self))]
    pub fn new_topic(&mut self, topic: &str) -> ScenecraftResult<Uuid> {
        if topic.trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyTopic).into());
        }
        let id = Uuid::new_v4();
        let mut draft = TopicDraft::new(topic.trim());
        draft.id = Some(id);
        draft.style = self.draft.style.clone();
        self.draft = draft;
        self.replan(None);
        info!(%id, "Started new draft");
        Ok(id)
    }

    /// Load a stored draft by identity or topic text.
    ///
    /// Unknown style identifiers in the stored draft are replaced with their
    /// fallbacks.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` when nothing matches `key`.
    #[instrument(skip(self, history))]
    pub async fn resume(&mut self, history: &DraftHistory, key: &str) -> ScenecraftResult<()> {
        let mut draft = history
            .load(key)
            .await?
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(key.to_string())))?;
        let replaced = normalize_selection(&mut draft.style);
        if !replaced.is_empty() {
            warn!(?replaced, "Stored draft had unknown style ids");
        }
        info!(id = ?draft.id, scenes = draft.scenes.len(), "Resumed draft");
        self.draft = draft;
        Ok(())
    }

    /// Save explicitly by stable identity.
    ///
    /// A draft still pending in `autosaver` is dropped first, so a snapshot
    /// taken before the identity was assigned cannot be written back under
    /// its topic key afterwards.
    #[instrument(skip_all)]
    pub async fn persist(
        &mut self,
        history: &DraftHistory,
        autosaver: Option<&Autosaver>,
    ) -> ScenecraftResult<Uuid> {
        if let Some(autosaver) = autosaver {
            autosaver.discard().await;
        }
        history.save_explicit(&mut self.draft).await
    }

    /// Hand the current state to the autosaver.
    pub fn autosave(&self, autosaver: &Autosaver) {
        autosaver.schedule(self.draft.clone());
    }

    /// Replace the cached model preferences.
    pub fn set_preferences(&mut self, preferences: ModelPreferences) {
        self.preferences = preferences;
    }

    /// Change the topic text. The stable identity, if any, is kept.
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.draft.topic = topic.into();
        self.draft.touch();
    }

    /// Replace the context fields.
    pub fn set_context(&mut self, context: DraftContext) {
        self.draft.context = context;
        self.draft.touch();
    }

    /// Replace the global style.
    ///
    /// Existing scenes keep their own settings; only scenes planned later
    /// pick up the new defaults. A duration change replans.
    pub fn set_style(&mut self, mut style: StyleSelection) {
        normalize_selection(&mut style);
        let duration_changed = style.duration != self.draft.style.duration;
        self.draft.style = style;
        if duration_changed {
            self.replan(None);
        }
        self.draft.touch();
    }

    /// Change the duration and replan.
    pub fn set_duration(&mut self, duration_id: &str) {
        self.draft.style.duration = duration_entry(duration_id).entry.id.to_string();
        self.replan(None);
    }

    /// Duration of the draft in seconds.
    pub fn duration_seconds(&self) -> u32 {
        duration_entry(&self.draft.style.duration).seconds
    }

    /// Resize the plan for the current duration, or to a pinned count.
    ///
    /// Surviving scenes keep their edits; outputs of removed scenes are
    /// dropped.
    pub fn replan(&mut self, pinned: Option<usize>) -> isize {
        let count = scene_count(self.duration_seconds(), self.clip_seconds, pinned);
        let delta = replan(&mut self.draft.scenes, count, &self.draft.style);
        self.draft.prune_outputs();
        self.draft.touch();
        delta
    }

    /// Replace one scene's settings.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownScene` for an index out of range.
    pub fn edit_scene_settings(
        &mut self,
        index: usize,
        settings: SceneSettings,
    ) -> ScenecraftResult<()> {
        self.scene_mut(index)?.settings = settings;
        self.draft.touch();
        Ok(())
    }

    /// Replace one prompt of a scene.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownScene` for an index out of range.
    pub fn edit_scene_prompt(
        &mut self,
        index: usize,
        field: PromptField,
        text: impl Into<String>,
    ) -> ScenecraftResult<()> {
        let text = text.into();
        let scene = self.scene_mut(index)?;
        match field {
            PromptField::Start => scene.start_prompt = text,
            PromptField::Mid => {
                scene.mid_prompt = Some(text).filter(|t| !t.trim().is_empty());
            }
            PromptField::End => scene.end_prompt = text,
            PromptField::Motion => scene.motion_prompt = text,
        }
        debug!(index, %field, "Edited scene prompt");
        self.draft.touch();
        Ok(())
    }

    /// Replace the character selection.
    pub fn select_characters(&mut self, selections: Vec<CharacterSelection>) {
        self.draft.characters = selections;
        self.draft.touch();
    }

    /// Replace the audio options.
    pub fn set_audio(&mut self, audio: AudioOptions) {
        self.draft.audio = audio;
        self.draft.touch();
    }

    /// Write a parsed script into the scenes.
    pub fn apply_script(&mut self, script: Vec<ScriptScene>) {
        apply_script(&mut self.draft.scenes, script);
        self.draft.touch();
    }

    /// Write dialogue-pass lines into the scenes.
    pub fn apply_dialogue(&mut self, lines: Vec<DialogueLines>) {
        apply_dialogue(&mut self.draft.scenes, lines);
        self.draft.touch();
    }

    /// Record a scene outcome.
    ///
    /// Frames are kept even when the scene failed afterwards. Outcomes for
    /// scenes no longer in the plan are ignored.
    pub fn apply_outcome(&mut self, outcome: SceneOutcome) {
        let index = *outcome.scene_index();
        if index >= self.draft.scenes.len() {
            warn!(index, "Ignoring outcome for removed scene");
            return;
        }
        let (frame, clip) = outcome.into_parts();
        if let Some(frame) = frame.filter(|f| !f.is_empty()) {
            self.draft.put_frame(frame);
        }
        if let Some(clip) = clip {
            self.draft.put_clip(clip);
        }
        self.draft.touch();
    }

    /// Record the background music URL.
    pub fn set_music(&mut self, url: Option<String>) {
        self.draft.music_url = url;
        self.draft.touch();
    }

    fn scene_mut(&mut self, index: usize) -> ScenecraftResult<&mut scenecraft_core::Scene> {
        let count = self.draft.scenes.len();
        self.draft.scenes.get_mut(index).ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::UnknownScene { index, count }).into()
        })
    }
}
