//! Scene generation.
//!
//! Per scene the still frames are generated first, in frame order, and
//! their URLs and seeds captured; only then is the motion clip requested,
//! anchored on the start and end frames. Scenes are independent of each
//! other and may run concurrently up to a caller-supplied cap.

use crate::{
    AbortSignal, CharacterSlots, DialogueLines, ScriptRequest, ScriptScene, dialogue_prompt,
    parse_dialogue, parse_script, planned_seconds,
};
use futures::stream::{self, StreamExt};
use scenecraft_core::{
    FramePosition, GeneratedClip, GeneratedFrame, GenerationKind, GenerationRequest,
    ModelPreferences, TopicDraft,
};
use scenecraft_error::{PipelineError, PipelineErrorKind, ScenecraftResult};
use scenecraft_invoke::RetryExecutor;
use scenecraft_style::{
    Dimension, compose_frame_prompt, compose_motion_prompt, format_entry, lookup,
};
use tracing::{debug, error, info, instrument, warn};

/// Seed policy for regenerated frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SeedMode {
    /// Send the stored seed for each frame (retry this frame)
    #[default]
    Reuse,
    /// Draw a new seed (redo this frame with a new look)
    Fresh,
}

/// How a scene's run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneStatus {
    /// Frames and clip were produced
    Completed,
    /// A call failed; earlier results of the scene are kept
    Failed(String),
    /// The run was abandoned before the scene was dispatched
    Abandoned,
}

/// Result of generating one scene.
///
/// `frame` holds every frame recorded so far, including frames carried over
/// from earlier runs, even when a later call of the scene failed.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct SceneOutcome {
    /// Scene index
    scene_index: usize,
    /// Frames recorded for the scene
    frame: Option<GeneratedFrame>,
    /// Clip, when the video call succeeded
    clip: Option<GeneratedClip>,
    /// How the run ended
    status: SceneStatus,
}

impl SceneOutcome {
    fn completed(scene_index: usize, frame: GeneratedFrame, clip: GeneratedClip) -> Self {
        Self {
            scene_index,
            frame: Some(frame),
            clip: Some(clip),
            status: SceneStatus::Completed,
        }
    }

    fn failed(scene_index: usize, frame: Option<GeneratedFrame>, message: impl Into<String>) -> Self {
        Self {
            scene_index,
            frame,
            clip: None,
            status: SceneStatus::Failed(message.into()),
        }
    }

    fn abandoned(scene_index: usize) -> Self {
        Self {
            scene_index,
            frame: None,
            clip: None,
            status: SceneStatus::Abandoned,
        }
    }

    /// True when the scene completed.
    pub fn is_success(&self) -> bool {
        self.status == SceneStatus::Completed
    }

    /// Frames and clip, consuming the outcome.
    pub fn into_parts(self) -> (Option<GeneratedFrame>, Option<GeneratedClip>) {
        (self.frame, self.clip)
    }

    /// Failure message, if the scene failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            SceneStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Drives generation calls for a draft.
#[derive(Debug, Clone)]
pub struct SceneGenerator {
    executor: RetryExecutor,
    preferences: ModelPreferences,
    clip_seconds: u32,
}

impl SceneGenerator {
    /// Generator issuing calls through `executor`.
    pub fn new(executor: RetryExecutor, preferences: ModelPreferences, clip_seconds: u32) -> Self {
        Self {
            executor,
            preferences,
            clip_seconds: clip_seconds.max(1),
        }
    }

    /// Clip length sent with every video call.
    pub fn clip_seconds(&self) -> u32 {
        self.clip_seconds
    }

    async fn text_call(&self, prompt: String) -> ScenecraftResult<String> {
        let request = GenerationRequest::new(
            GenerationKind::Text,
            self.preferences.model_for(GenerationKind::Text),
            prompt,
        );
        let output = self.executor.invoke(request).await.into_result()?;
        output
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                PipelineError::new(PipelineErrorKind::MalformedScript(
                    "text model returned no text".to_string(),
                ))
                .into()
            })
    }

    /// Run the script call for a draft's planned scenes.
    ///
    /// # Errors
    ///
    /// Fails when the draft has no topic or no scenes, when the text call
    /// fails after retries, or when the response cannot be parsed.
    #[instrument(skip(self, draft, slots), fields(scenes = draft.scenes.len()))]
    pub async fn write_script(
        &self,
        draft: &TopicDraft,
        slots: &CharacterSlots,
    ) -> ScenecraftResult<Vec<ScriptScene>> {
        if !draft.has_topic() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyTopic).into());
        }
        if draft.scenes.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::NoScenes).into());
        }

        let request = ScriptRequest::new(draft, slots, self.clip_seconds);
        let text = self.text_call(request.prompt().to_string()).await?;
        let script = parse_script(&text, request.scene_count())?;
        info!(scenes = script.len(), "Script written");
        Ok(script)
    }

    /// Run the dialogue pass.
    ///
    /// # Errors
    ///
    /// Same as [`SceneGenerator::write_script`].
    #[instrument(skip(self, draft), fields(scenes = draft.scenes.len()))]
    pub async fn write_dialogue(&self, draft: &TopicDraft) -> ScenecraftResult<Vec<DialogueLines>> {
        if draft.scenes.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::NoScenes).into());
        }
        let text = self.text_call(dialogue_prompt(draft)).await?;
        let lines = parse_dialogue(&text, draft.scenes.len())?;
        info!(scenes = lines.len(), "Dialogue written");
        Ok(lines)
    }

    fn seed_for(mode: SeedMode, frame: &GeneratedFrame, position: FramePosition) -> u32 {
        match mode {
            SeedMode::Reuse => frame.seed_for(position).unwrap_or_else(rand::random),
            SeedMode::Fresh => rand::random(),
        }
    }

    /// Generate the frames and clip of one scene.
    ///
    /// Never fails as a whole: failures are reported in the outcome and the
    /// frames recorded before the failure are kept.
    #[instrument(skip(self, draft, slots))]
    pub async fn generate_scene(
        &self,
        draft: &TopicDraft,
        index: usize,
        slots: &CharacterSlots,
        seed_mode: SeedMode,
    ) -> SceneOutcome {
        let Some(scene) = draft.scenes.get(index) else {
            let err = PipelineError::new(PipelineErrorKind::UnknownScene {
                index,
                count: draft.scenes.len(),
            });
            return SceneOutcome::failed(index, None, err.kind.to_string());
        };
        if !scene.has_prompts() {
            return SceneOutcome::failed(
                index,
                draft.frame(index).cloned(),
                format!("Scene {} has no prompts", index + 1),
            );
        }

        let format = format_entry(&draft.style.output_format);
        let references = slots.reference_images();
        let mut frame = draft
            .frame(index)
            .cloned()
            .unwrap_or_else(|| GeneratedFrame::new(index));

        for position in scene.frame_positions() {
            let seed = Self::seed_for(seed_mode, &frame, position);
            let prompt = compose_frame_prompt(
                scene.frame_prompt(position),
                &draft.style,
                &scene.settings,
                slots.instruction_block(),
            );
            let mut request = GenerationRequest::new(
                GenerationKind::Image,
                self.preferences.model_for(GenerationKind::Image),
                prompt,
            )
            .with_aspect_ratio(format.aspect_ratio.to_string())
            .with_seed(seed);
            if !references.is_empty() {
                request = request.with_reference_images(references.clone());
            }

            match self.executor.invoke(request).await.into_result() {
                Ok(output) => match output.url {
                    Some(url) => {
                        let seed = output.seed.unwrap_or(seed);
                        debug!(%position, seed, "Frame generated");
                        frame.record(position, url, seed);
                    }
                    None => {
                        warn!(%position, "Image call returned no URL");
                        return SceneOutcome::failed(
                            index,
                            Some(frame),
                            format!("{} frame: provider returned no image", position),
                        );
                    }
                },
                Err(e) => {
                    error!(%position, error = %e, "Frame generation failed");
                    return SceneOutcome::failed(
                        index,
                        Some(frame),
                        format!("{} frame: {}", position, e.kind),
                    );
                }
            }
        }

        let (Some(start), Some(end)) = (
            frame.image_for(FramePosition::Start),
            frame.image_for(FramePosition::End),
        ) else {
            return SceneOutcome::failed(index, Some(frame), "Scene is missing a start or end frame");
        };

        let request = GenerationRequest::new(
            GenerationKind::Video,
            self.preferences.model_for(GenerationKind::Video),
            compose_motion_prompt(scene, &draft.style, Some(self.clip_seconds)),
        )
        .with_reference_images(vec![start.to_string(), end.to_string()])
        .with_duration_seconds(self.clip_seconds)
        .with_aspect_ratio(format.aspect_ratio.to_string())
        .with_generate_audio(draft.audio.clips_have_audio());

        match self.executor.invoke(request).await.into_result() {
            Ok(output) => match output.url {
                Some(url) => {
                    info!(scene = index, "Scene generated");
                    SceneOutcome::completed(
                        index,
                        frame,
                        GeneratedClip {
                            scene_index: index,
                            url,
                        },
                    )
                }
                None => SceneOutcome::failed(index, Some(frame), "clip: provider returned no video"),
            },
            Err(e) => {
                error!(error = %e, "Clip generation failed");
                SceneOutcome::failed(index, Some(frame), format!("clip: {}", e.kind))
            }
        }
    }

    /// Generate every scene of a draft.
    ///
    /// At most `concurrency` scenes run at once. Once `abort` is raised no
    /// further scene is started; scenes already running finish. Outcomes are
    /// returned in scene order.
    #[instrument(skip(self, draft, slots, abort), fields(scenes = draft.scenes.len()))]
    pub async fn generate_all(
        &self,
        draft: &TopicDraft,
        slots: &CharacterSlots,
        seed_mode: SeedMode,
        concurrency: usize,
        abort: &AbortSignal,
    ) -> Vec<SceneOutcome> {
        let mut outcomes: Vec<SceneOutcome> = stream::iter(0..draft.scenes.len())
            .map(|index| async move {
                if abort.is_raised() {
                    debug!(scene = index, "Run abandoned, skipping scene");
                    return SceneOutcome::abandoned(index);
                }
                self.generate_scene(draft, index, slots, seed_mode).await
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        outcomes.sort_by_key(|o| o.scene_index);
        let completed = outcomes.iter().filter(|o| o.is_success()).count();
        info!(completed, total = outcomes.len(), "Generation run finished");
        outcomes
    }

    /// Generate the background music track, when enabled.
    ///
    /// The track covers the full video: scene count times clip length.
    ///
    /// # Errors
    ///
    /// Fails when the music call fails after retries or returns no URL.
    #[instrument(skip(self, draft))]
    pub async fn generate_music(&self, draft: &TopicDraft) -> ScenecraftResult<Option<String>> {
        let music = &draft.audio.music;
        if !music.enabled {
            return Ok(None);
        }
        if draft.scenes.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::NoScenes).into());
        }

        let mood = match draft.style.custom_mood() {
            Some(custom) => custom.to_string(),
            None => lookup(Dimension::Mood, &draft.style.mood).description.to_string(),
        };
        let mut prompt = format!(
            "Instrumental background music for a short video about: {}\nMood: {}",
            draft.topic.trim(),
            mood
        );
        if !music.style.trim().is_empty() {
            prompt.push_str(&format!("\nMusical style: {}", music.style.trim()));
        }
        if !music.mood.trim().is_empty() {
            prompt.push_str(&format!("\nMusical mood: {}", music.mood.trim()));
        }

        let seconds = planned_seconds(draft.scenes.len(), self.clip_seconds);
        let request = GenerationRequest::new(
            GenerationKind::Music,
            self.preferences.model_for(GenerationKind::Music),
            prompt,
        )
        .with_duration_seconds(seconds);

        let output = self.executor.invoke(request).await.into_result()?;
        match output.url {
            Some(url) => {
                info!(seconds, "Music generated");
                Ok(Some(url))
            }
            None => Err(PipelineError::new(PipelineErrorKind::StageFailed {
                stage: "music".to_string(),
                message: "provider returned no track".to_string(),
            })
            .into()),
        }
    }
}
