//! Planned scenes.

use crate::{FramePosition, SceneSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One planned scene of a draft.
///
/// Scenes are created by the planner with empty prompts; the script stage or
/// a manual edit fills them in. The `index` is 0-based and matches the
/// scene's position in the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// 0-based position in the draft
    pub index: usize,
    /// Camera and pacing settings for this scene
    pub settings: SceneSettings,
    /// Still-frame prompt for the opening frame
    #[serde(default)]
    pub start_prompt: String,
    /// Optional still-frame prompt for a middle frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid_prompt: Option<String>,
    /// Still-frame prompt for the closing frame
    #[serde(default)]
    pub end_prompt: String,
    /// Motion prompt for the clip
    #[serde(default)]
    pub motion_prompt: String,
    /// Spoken lines keyed by the frame they accompany
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dialogue: BTreeMap<FramePosition, String>,
}

impl Scene {
    /// Create an empty scene with the given settings.
    pub fn new(index: usize, settings: SceneSettings) -> Self {
        Self {
            index,
            settings,
            start_prompt: String::new(),
            mid_prompt: None,
            end_prompt: String::new(),
            motion_prompt: String::new(),
            dialogue: BTreeMap::new(),
        }
    }

    /// Frame positions this scene renders, in order.
    pub fn frame_positions(&self) -> Vec<FramePosition> {
        let mut positions = vec![FramePosition::Start];
        if self.mid_prompt.as_deref().is_some_and(|p| !p.trim().is_empty()) {
            positions.push(FramePosition::Mid);
        }
        positions.push(FramePosition::End);
        positions
    }

    /// Still-frame prompt text for a position.
    pub fn frame_prompt(&self, position: FramePosition) -> &str {
        match position {
            FramePosition::Start => &self.start_prompt,
            FramePosition::Mid => self.mid_prompt.as_deref().unwrap_or(""),
            FramePosition::End => &self.end_prompt,
        }
    }

    /// Whether the script stage (or a manual edit) has filled this scene.
    pub fn has_prompts(&self) -> bool {
        !self.start_prompt.trim().is_empty()
            && !self.end_prompt.trim().is_empty()
            && !self.motion_prompt.trim().is_empty()
    }
}
