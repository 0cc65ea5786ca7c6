use scenecraft_core::{SceneSettings, StyleSelection};
use scenecraft_pipeline::{plan_scenes, planned_seconds, replan, scene_count};

#[test]
fn scene_count_is_ceiling_of_duration_over_cap() {
    for duration in [0u32, 1, 7, 8, 9, 15, 16, 30, 60, 61, 180] {
        for cap in [1u32, 4, 8, 10] {
            let expected = (duration.div_ceil(cap) as usize).max(1);
            assert_eq!(
                plan_scenes(duration, cap, None, &StyleSelection::default()).len(),
                expected,
                "duration {} cap {}",
                duration,
                cap
            );
        }
    }
}

#[test]
fn pinned_count_wins() {
    assert_eq!(scene_count(30, 8, Some(7)), 7);
    assert_eq!(scene_count(30, 8, Some(0)), 1);
}

#[test]
fn zero_cap_does_not_divide_by_zero() {
    assert_eq!(scene_count(5, 0, None), 5);
}

#[test]
fn planned_scenes_are_indexed_and_copy_global_settings() {
    let style = StyleSelection {
        camera_movement: "dolly-in".to_string(),
        pacing: "fast".to_string(),
        ..Default::default()
    };
    let scenes = plan_scenes(24, 8, None, &style);

    assert_eq!(scenes.len(), 3);
    for (i, scene) in scenes.iter().enumerate() {
        assert_eq!(scene.index, i);
        assert_eq!(scene.settings, style.scene_defaults());
        assert!(!scene.has_prompts());
    }
}

#[test]
fn replan_keeps_surviving_edits_and_extends_with_defaults() {
    let style = StyleSelection::default();
    let mut scenes = plan_scenes(16, 8, None, &style);
    scenes[1].start_prompt = "A hand opens a letter".to_string();
    scenes[1].settings = SceneSettings {
        shot_size: "close-up".to_string(),
        ..Default::default()
    };

    let changed = StyleSelection {
        pacing: "slow".to_string(),
        ..Default::default()
    };
    let delta = replan(&mut scenes, 4, &changed);

    assert_eq!(delta, 2);
    assert_eq!(scenes.len(), 4);
    assert_eq!(scenes[1].start_prompt, "A hand opens a letter");
    assert_eq!(scenes[1].settings.shot_size, "close-up");
    assert_eq!(scenes[0].settings.pacing, style.pacing);
    assert_eq!(scenes[3].index, 3);
    assert_eq!(scenes[3].settings.pacing, "slow");
}

#[test]
fn replan_truncates_tail_only() {
    let style = StyleSelection::default();
    let mut scenes = plan_scenes(40, 8, None, &style);
    scenes[0].motion_prompt = "Slow push in".to_string();

    let delta = replan(&mut scenes, 2, &style);

    assert_eq!(delta, -3);
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].motion_prompt, "Slow push in");
}

#[test]
fn planned_length_saturates() {
    assert_eq!(planned_seconds(6, 8), 48);
    assert_eq!(planned_seconds(0, 8), 0);
    assert_eq!(planned_seconds(1 << 30, 8), u32::MAX);
    assert_eq!(planned_seconds(usize::MAX, 1), u32::MAX);
}
