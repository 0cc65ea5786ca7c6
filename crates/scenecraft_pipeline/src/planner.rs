//! Scene planning.

use scenecraft_core::{Scene, StyleSelection};
use tracing::debug;

/// Number of scenes for a duration.
///
/// A pinned count wins; otherwise `ceil(duration / clip_cap)`. Never less
/// than one.
///
/// # Examples
///
/// ```
/// use scenecraft_pipeline::scene_count;
///
/// assert_eq!(scene_count(30, 8, None), 4);
/// assert_eq!(scene_count(30, 8, Some(2)), 2);
/// assert_eq!(scene_count(0, 8, None), 1);
/// ```
pub fn scene_count(duration_seconds: u32, clip_cap_seconds: u32, pinned: Option<usize>) -> usize {
    let count = match pinned {
        Some(count) => count,
        None => duration_seconds.div_ceil(clip_cap_seconds.max(1)) as usize,
    };
    count.max(1)
}

/// Total length of a plan in seconds, saturating at `u32::MAX`.
///
/// # Examples
///
/// ```
/// use scenecraft_pipeline::planned_seconds;
///
/// assert_eq!(planned_seconds(4, 8), 32);
/// assert_eq!(planned_seconds(usize::MAX, 8), u32::MAX);
/// ```
pub fn planned_seconds(scene_count: usize, clip_seconds: u32) -> u32 {
    u32::try_from(scene_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(clip_seconds)
}

/// Plan a fresh set of scenes.
///
/// Each scene gets its own copy of the global style's per-scene settings.
pub fn plan_scenes(
    duration_seconds: u32,
    clip_cap_seconds: u32,
    pinned: Option<usize>,
    style: &StyleSelection,
) -> Vec<Scene> {
    let count = scene_count(duration_seconds, clip_cap_seconds, pinned);
    debug!(duration_seconds, clip_cap_seconds, ?pinned, count, "Planning scenes");
    (0..count)
        .map(|index| Scene::new(index, style.scene_defaults()))
        .collect()
}

/// Resize an existing plan to `count` scenes.
///
/// Scenes whose index survives are left untouched, manual edits included.
/// Only the tail changes: extra scenes are dropped, new ones take the
/// current global defaults. Returns the number of scenes added (positive)
/// or removed (negative).
pub fn replan(scenes: &mut Vec<Scene>, count: usize, style: &StyleSelection) -> isize {
    let count = count.max(1);
    let before = scenes.len();
    if count < before {
        scenes.truncate(count);
    } else {
        scenes.extend((before..count).map(|index| Scene::new(index, style.scene_defaults())));
    }
    debug!(before, after = count, "Replanned scenes");
    count as isize - before as isize
}
