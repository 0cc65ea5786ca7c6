use scenecraft_core::{
    Character, CharacterRole, CharacterSelection, DraftContext, FramePosition, StyleSelection,
    TopicDraft,
};
use scenecraft_error::PipelineErrorKind;
use scenecraft_pipeline::{
    CharacterSlots, DialogueLines, ScriptRequest, apply_dialogue, apply_script, dialogue_prompt,
    parse_dialogue, parse_script, plan_scenes, resolve_character_slots,
};

fn draft(scenes: usize) -> TopicDraft {
    let mut draft = TopicDraft::new("The last lighthouse keeper");
    draft.context = DraftContext {
        background: "A remote island in the North Sea".to_string(),
        special_instructions: "No text on screen".to_string(),
        ..Default::default()
    };
    draft.scenes = plan_scenes(8 * scenes as u32, 8, None, &StyleSelection::default());
    draft
}

const SCRIPT: &str = r#"Here is your script:
```json
[
  {"start": "Keeper climbs the stairs", "end": "Keeper lights the lamp", "motion": "Slow climb"},
  {"start": "Storm clouds", "mid": "Lightning", "end": "Calm sea", "motion": "Time lapse",
   "dialogue": "It was always the storms."}
]
```
Enjoy!"#;

#[test]
fn script_request_includes_topic_context_and_scene_list() {
    let draft = draft(3);
    let request = ScriptRequest::new(&draft, &CharacterSlots::default(), 8);
    let prompt = request.prompt();

    assert_eq!(request.scene_count(), 3);
    assert!(prompt.contains("The last lighthouse keeper"));
    assert!(prompt.contains("Background: A remote island in the North Sea"));
    assert!(prompt.contains("Special instructions: No text on screen"));
    assert!(!prompt.contains("Scene notes:"));
    assert!(prompt.contains("# Style Guide"));
    assert!(prompt.contains("SCENES (3 total, 8 seconds each)"));
    assert!(prompt.contains("\n3. "));
    assert!(prompt.contains("exactly 3 objects"));
}

#[test]
fn script_request_describes_only_unslotted_characters() {
    let mut draft = draft(1);
    let registry = vec![
        Character {
            id: "mara".to_string(),
            name: "Mara".to_string(),
            role: CharacterRole::Protagonist,
            appearance: "weathered face, grey beard".to_string(),
            clothing: "yellow oilskin".to_string(),
            personality: String::new(),
            reference_images: vec!["https://cdn/mara.png".to_string()],
            generated_images: vec![],
        },
        Character {
            id: "gull".to_string(),
            name: "Gull".to_string(),
            role: CharacterRole::Extra,
            appearance: "one-legged seagull".to_string(),
            clothing: String::new(),
            personality: String::new(),
            reference_images: vec![],
            generated_images: vec![],
        },
    ];
    draft.characters = vec![CharacterSelection::new("mara"), CharacterSelection::new("gull")];
    let slots = resolve_character_slots(&registry, &draft.characters);

    let prompt = ScriptRequest::new(&draft, &slots, 8).prompt().to_string();

    assert!(prompt.contains("CHARACTER REFERENCES"));
    assert!(prompt.contains("- Mara (protagonist): slot 1"));
    assert!(!prompt.contains("weathered face"));
    assert!(prompt.contains("one-legged seagull"));
}

#[test]
fn parses_fenced_script() {
    let script = parse_script(SCRIPT, 2).unwrap();

    assert_eq!(script.len(), 2);
    assert_eq!(script[0].mid, None);
    assert_eq!(script[1].mid.as_deref(), Some("Lightning"));
    assert_eq!(script[1].dialogue.as_deref(), Some("It was always the storms."));
}

#[test]
fn parses_bare_array_in_prose() {
    let text = r#"Sure. [{"start": "a", "end": "b", "motion": "c"}] Let me know."#;
    assert_eq!(parse_script(text, 1).unwrap()[0].start, "a");
}

#[test]
fn count_mismatch_is_reported() {
    let err = parse_script(SCRIPT, 3).unwrap_err();
    assert_eq!(
        err.kind,
        PipelineErrorKind::ScriptCountMismatch {
            returned: 2,
            expected: 3
        }
    );
}

#[test]
fn malformed_response_is_reported() {
    let err = parse_script("I cannot help with that.", 1).unwrap_err();
    assert!(matches!(err.kind, PipelineErrorKind::MalformedScript(_)));

    let err = parse_script(r#"[{"start": "a"}]"#, 1).unwrap_err();
    assert!(matches!(err.kind, PipelineErrorKind::MalformedScript(_)));
}

#[test]
fn apply_script_fills_prompts_and_keeps_settings() {
    let mut draft = draft(2);
    draft.scenes[1].settings.shot_size = "close-up".to_string();

    apply_script(&mut draft.scenes, parse_script(SCRIPT, 2).unwrap());

    assert!(draft.scenes.iter().all(|s| s.has_prompts()));
    assert_eq!(draft.scenes[1].settings.shot_size, "close-up");
    assert_eq!(draft.scenes[1].mid_prompt.as_deref(), Some("Lightning"));
    assert_eq!(
        draft.scenes[1].dialogue.get(&FramePosition::Start).map(String::as_str),
        Some("It was always the storms.")
    );
    assert!(draft.scenes[0].dialogue.is_empty());
}

#[test]
fn dialogue_pass_replaces_lines() {
    let mut draft = draft(2);
    draft.audio.narration.enabled = true;
    apply_script(&mut draft.scenes, parse_script(SCRIPT, 2).unwrap());

    let prompt = dialogue_prompt(&draft);
    assert!(prompt.contains("Keeper climbs the stairs -> Keeper lights the lamp"));
    assert!(prompt.contains("exactly 2 objects"));

    let lines: Vec<DialogueLines> = parse_dialogue(
        r#"[{"start": "Every night.", "end": "  "}, {"end": "Until the last."}]"#,
        2,
    )
    .unwrap();
    apply_dialogue(&mut draft.scenes, lines);

    assert_eq!(draft.scenes[0].dialogue.len(), 1);
    assert_eq!(
        draft.scenes[0].dialogue.get(&FramePosition::Start).map(String::as_str),
        Some("Every night.")
    );
    assert_eq!(
        draft.scenes[1].dialogue.get(&FramePosition::End).map(String::as_str),
        Some("Until the last.")
    );
    assert!(!draft.scenes[1].dialogue.contains_key(&FramePosition::Start));
}

#[test]
fn script_request_states_catalog_length_for_unpinned_plan() {
    let mut draft = draft(4);
    draft.style.duration = "30s".to_string();
    let prompt = ScriptRequest::new(&draft, &CharacterSlots::default(), 8)
        .prompt()
        .to_string();

    assert!(prompt.starts_with("Write a shot-by-shot script for a thirty-second short"));
}

#[test]
fn script_request_states_planned_length_for_pinned_plan() {
    let mut draft = draft(6);
    draft.style.duration = "30s".to_string();
    let prompt = ScriptRequest::new(&draft, &CharacterSlots::default(), 8)
        .prompt()
        .to_string();

    assert!(prompt.starts_with("Write a shot-by-shot script for a 48-second short"));
}
