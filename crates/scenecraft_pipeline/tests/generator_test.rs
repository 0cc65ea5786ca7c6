use async_trait::async_trait;
use scenecraft_core::{
    Character, CharacterRole, CharacterSelection, FramePosition, GeneratedFrame, GenerationKind,
    GenerationOutput, GenerationRequest, GenerationResponse, ModelPreferences, StyleSelection,
    TopicDraft,
};
use scenecraft_interface::GenerationInvoker;
use scenecraft_invoke::{RetryExecutor, RetryPolicy};
use scenecraft_pipeline::{
    AbortSignal, CharacterSlots, SceneGenerator, SceneStatus, SeedMode, apply_script,
    parse_script, plan_scenes, resolve_character_slots,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Invoker that replays canned responses and records every request.
///
/// Once the script runs out it answers every call with a URL derived from
/// the call number.
#[derive(Default)]
struct ScriptedInvoker {
    responses: Mutex<VecDeque<GenerationResponse>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedInvoker {
    fn new(responses: Vec<GenerationResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationInvoker for ScriptedInvoker {
    async fn invoke(&self, request: &GenerationRequest) -> GenerationResponse {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            GenerationResponse::Success(GenerationOutput::url(format!(
                "https://cdn/{}-{}",
                request.kind, call
            )))
        })
    }
}

fn generator(invoker: Arc<ScriptedInvoker>) -> SceneGenerator {
    let policy = RetryPolicy::builder()
        .max_attempts(3)
        .backoff_step(Duration::from_secs(2))
        .strip_delay(Duration::from_millis(500))
        .jitter(false)
        .build()
        .unwrap();
    SceneGenerator::new(
        RetryExecutor::new(invoker, policy),
        ModelPreferences::default(),
        8,
    )
}

fn scripted_draft(scenes: usize) -> TopicDraft {
    let mut draft = TopicDraft::with_identity("Harbor at dawn");
    draft.scenes = plan_scenes(8 * scenes as u32, 8, None, &StyleSelection::default());
    let entries: Vec<String> = (0..scenes)
        .map(|i| {
            format!(
                r#"{{"start": "Boats {} at rest", "end": "Boats {} leaving", "motion": "Drift"}}"#,
                i, i
            )
        })
        .collect();
    let script = parse_script(&format!("[{}]", entries.join(",")), scenes).unwrap();
    apply_script(&mut draft.scenes, script);
    draft
}

#[tokio::test(start_paused = true)]
async fn frames_are_generated_before_the_clip_that_references_them() {
    let invoker = ScriptedInvoker::new(vec![
        GenerationResponse::Success(GenerationOutput::url("https://cdn/start.png").with_seed(5)),
        GenerationResponse::Success(GenerationOutput::url("https://cdn/end.png").with_seed(9)),
        GenerationResponse::Success(GenerationOutput::url("https://cdn/clip.mp4")),
    ]);
    let generator = generator(invoker.clone());
    let mut draft = scripted_draft(1);
    draft.audio.narration.enabled = true;

    let outcome = generator
        .generate_scene(&draft, 0, &CharacterSlots::default(), SeedMode::Fresh)
        .await;

    assert!(outcome.is_success());
    let kinds: Vec<GenerationKind> = invoker.requests().iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![GenerationKind::Image, GenerationKind::Image, GenerationKind::Video]
    );

    let frame = outcome.frame().as_ref().unwrap();
    assert_eq!(frame.images().len(), frame.seeds().len());
    assert_eq!(frame.seeds(), &[5, 9]);

    let video = &invoker.requests()[2];
    assert_eq!(
        video.reference_images,
        Some(vec![
            "https://cdn/start.png".to_string(),
            "https://cdn/end.png".to_string()
        ])
    );
    assert_eq!(video.duration_seconds, Some(8));
    assert_eq!(video.aspect_ratio.as_deref(), Some("16:9"));
    assert_eq!(video.generate_audio, Some(true));
    assert!(video.prompt.contains("Clip length: 8 seconds."));
    assert_eq!(outcome.clip().as_ref().unwrap().url, "https://cdn/clip.mp4");
}

#[tokio::test(start_paused = true)]
async fn reuse_sends_the_stored_seeds() {
    let invoker = ScriptedInvoker::new(vec![]);
    let generator = generator(invoker.clone());
    let mut draft = scripted_draft(1);
    let mut frame = GeneratedFrame::new(0);
    frame.record(FramePosition::Start, "https://cdn/old-start.png", 1234);
    frame.record(FramePosition::End, "https://cdn/old-end.png", 5678);
    draft.put_frame(frame);

    let outcome = generator
        .generate_scene(&draft, 0, &CharacterSlots::default(), SeedMode::Reuse)
        .await;

    let sent: Vec<Option<u32>> = invoker
        .requests()
        .iter()
        .filter(|r| r.kind == GenerationKind::Image)
        .map(|r| r.seed)
        .collect();
    assert_eq!(sent, vec![Some(1234), Some(5678)]);

    let frame = outcome.frame().as_ref().unwrap();
    assert_eq!(frame.seed_for(FramePosition::Start), Some(1234));
    assert_eq!(frame.seed_for(FramePosition::End), Some(5678));
    assert_ne!(frame.image_for(FramePosition::Start), Some("https://cdn/old-start.png"));
}

#[tokio::test(start_paused = true)]
async fn fresh_records_the_seed_it_sent() {
    let invoker = ScriptedInvoker::new(vec![]);
    let generator = generator(invoker.clone());
    let draft = scripted_draft(1);

    let outcome = generator
        .generate_scene(&draft, 0, &CharacterSlots::default(), SeedMode::Fresh)
        .await;

    let requests = invoker.requests();
    let frame = outcome.frame().as_ref().unwrap();
    assert_eq!(requests[0].seed, frame.seed_for(FramePosition::Start));
    assert_eq!(requests[1].seed, frame.seed_for(FramePosition::End));
}

#[tokio::test(start_paused = true)]
async fn mid_frame_is_generated_when_present() {
    let invoker = ScriptedInvoker::new(vec![]);
    let generator = generator(invoker.clone());
    let mut draft = scripted_draft(1);
    draft.scenes[0].mid_prompt = Some("Gulls overhead".to_string());

    let outcome = generator
        .generate_scene(&draft, 0, &CharacterSlots::default(), SeedMode::Fresh)
        .await;

    let frame = outcome.frame().as_ref().unwrap();
    assert_eq!(
        frame.positions(),
        &[FramePosition::Start, FramePosition::Mid, FramePosition::End]
    );
    assert!(invoker.requests()[1].prompt.starts_with("Gulls overhead"));
}

#[tokio::test(start_paused = true)]
async fn character_references_go_to_frame_calls_only() {
    let invoker = ScriptedInvoker::new(vec![]);
    let generator = generator(invoker.clone());
    let mut draft = scripted_draft(1);
    draft.characters = vec![CharacterSelection::new("mara")];
    let registry = vec![Character {
        id: "mara".to_string(),
        name: "Mara".to_string(),
        role: CharacterRole::Protagonist,
        appearance: String::new(),
        clothing: String::new(),
        personality: String::new(),
        reference_images: vec!["https://cdn/mara.png".to_string()],
        generated_images: vec![],
    }];
    let slots = resolve_character_slots(&registry, &draft.characters);

    generator
        .generate_scene(&draft, 0, &slots, SeedMode::Fresh)
        .await;

    let requests = invoker.requests();
    assert_eq!(
        requests[0].reference_images,
        Some(vec!["https://cdn/mara.png".to_string()])
    );
    assert!(requests[0].prompt.contains("CHARACTER REFERENCES"));
    assert!(!requests[2].prompt.contains("CHARACTER REFERENCES"));
}

#[tokio::test(start_paused = true)]
async fn failed_clip_keeps_frames() {
    let invoker = ScriptedInvoker::new(vec![
        GenerationResponse::Success(GenerationOutput::url("https://cdn/start.png")),
        GenerationResponse::Success(GenerationOutput::url("https://cdn/end.png")),
        GenerationResponse::failure("HTTP 401: Unauthorized"),
    ]);
    let generator = generator(invoker.clone());
    let draft = scripted_draft(1);

    let outcome = generator
        .generate_scene(&draft, 0, &CharacterSlots::default(), SeedMode::Fresh)
        .await;

    assert!(!outcome.is_success());
    assert!(outcome.failure().unwrap().starts_with("clip:"));
    assert_eq!(invoker.requests().len(), 3);
    assert!(outcome.clip().is_none());
    assert_eq!(outcome.frame().as_ref().unwrap().images().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn scene_without_prompts_fails_without_calls() {
    let invoker = ScriptedInvoker::new(vec![]);
    let generator = generator(invoker.clone());
    let mut draft = scripted_draft(1);
    draft.scenes[0].start_prompt.clear();

    let outcome = generator
        .generate_scene(&draft, 0, &CharacterSlots::default(), SeedMode::Fresh)
        .await;

    assert!(matches!(outcome.status(), SceneStatus::Failed(_)));
    assert!(invoker.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn generate_all_returns_outcomes_in_scene_order() {
    let invoker = ScriptedInvoker::new(vec![]);
    let generator = generator(invoker.clone());
    let draft = scripted_draft(4);

    let outcomes = generator
        .generate_all(
            &draft,
            &CharacterSlots::default(),
            SeedMode::Fresh,
            3,
            &AbortSignal::new(),
        )
        .await;

    let indices: Vec<usize> = outcomes.iter().map(|o| *o.scene_index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(outcomes.iter().all(|o| o.is_success()));
    assert_eq!(invoker.requests().len(), 12);
}

#[tokio::test(start_paused = true)]
async fn abandoned_run_dispatches_nothing() {
    let invoker = ScriptedInvoker::new(vec![]);
    let generator = generator(invoker.clone());
    let draft = scripted_draft(3);
    let abort = AbortSignal::new();
    abort.raise();

    let outcomes = generator
        .generate_all(&draft, &CharacterSlots::default(), SeedMode::Fresh, 1, &abort)
        .await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| *o.status() == SceneStatus::Abandoned));
    assert!(invoker.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn write_script_parses_the_text_response() {
    let invoker = ScriptedInvoker::new(vec![GenerationResponse::Success(
        GenerationOutput::text(
            r#"```json
[{"start": "s", "end": "e", "motion": "m"}, {"start": "s2", "end": "e2", "motion": "m2"}]
```"#,
        ),
    )]);
    let generator = generator(invoker.clone());
    let mut draft = TopicDraft::with_identity("Harbor at dawn");
    draft.scenes = plan_scenes(16, 8, None, &StyleSelection::default());

    let script = generator
        .write_script(&draft, &CharacterSlots::default())
        .await
        .unwrap();

    assert_eq!(script.len(), 2);
    assert_eq!(invoker.requests()[0].kind, GenerationKind::Text);
    assert_eq!(invoker.requests()[0].model_key, "script-standard");
}

#[tokio::test(start_paused = true)]
async fn write_script_rejects_blank_topic() {
    let invoker = ScriptedInvoker::new(vec![]);
    let generator = generator(invoker.clone());
    let mut draft = TopicDraft::new("   ");
    draft.scenes = plan_scenes(8, 8, None, &StyleSelection::default());

    assert!(
        generator
            .write_script(&draft, &CharacterSlots::default())
            .await
            .is_err()
    );
    assert!(invoker.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn music_spans_the_whole_video() {
    let invoker = ScriptedInvoker::new(vec![]);
    let generator = generator(invoker.clone());
    let mut draft = scripted_draft(3);

    assert_eq!(generator.generate_music(&draft).await.unwrap(), None);
    assert!(invoker.requests().is_empty());

    draft.audio.music.enabled = true;
    let url = generator.generate_music(&draft).await.unwrap();

    assert!(url.is_some());
    let request = &invoker.requests()[0];
    assert_eq!(request.kind, GenerationKind::Music);
    assert_eq!(request.duration_seconds, Some(24));
}
