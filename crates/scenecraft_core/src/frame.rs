//! Generated frames and clips.

use serde::{Deserialize, Serialize};

/// Position of a still frame within a scene.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FramePosition {
    /// Opening frame
    Start,
    /// Optional middle frame
    Mid,
    /// Closing frame
    End,
}

/// Still frames produced for one scene, with the seed behind each image.
///
/// `images`, `seeds` and `positions` are parallel lists ordered by position.
/// They are only mutated together through [`GeneratedFrame::record`], so their
/// lengths always agree. Deserialization rejects stored frames that break
/// this.
///
/// # Examples
///
/// ```
/// use scenecraft_core::{FramePosition, GeneratedFrame};
///
/// let mut frame = GeneratedFrame::new(0);
/// frame.record(FramePosition::End, "https://cdn/end.png", 7);
/// frame.record(FramePosition::Start, "https://cdn/start.png", 3);
/// assert_eq!(frame.images(), &["https://cdn/start.png", "https://cdn/end.png"]);
/// assert_eq!(frame.seed_for(FramePosition::End), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(try_from = "RawGeneratedFrame")]
pub struct GeneratedFrame {
    /// Scene this frame set belongs to
    scene_index: usize,
    /// Produced image URLs
    images: Vec<String>,
    /// Seed per image
    seeds: Vec<u32>,
    /// Frame position per image
    positions: Vec<FramePosition>,
}

/// Unchecked wire form of [`GeneratedFrame`].
#[derive(Deserialize)]
struct RawGeneratedFrame {
    scene_index: usize,
    images: Vec<String>,
    seeds: Vec<u32>,
    positions: Vec<FramePosition>,
}

impl TryFrom<RawGeneratedFrame> for GeneratedFrame {
    type Error = String;

    fn try_from(raw: RawGeneratedFrame) -> Result<Self, Self::Error> {
        if raw.images.len() != raw.seeds.len() || raw.images.len() != raw.positions.len() {
            return Err(format!(
                "frame for scene {} has {} images, {} seeds and {} positions",
                raw.scene_index,
                raw.images.len(),
                raw.seeds.len(),
                raw.positions.len()
            ));
        }
        if raw.positions.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(format!(
                "frame for scene {} has unordered or repeated positions",
                raw.scene_index
            ));
        }
        Ok(Self {
            scene_index: raw.scene_index,
            images: raw.images,
            seeds: raw.seeds,
            positions: raw.positions,
        })
    }
}

impl GeneratedFrame {
    /// Create an empty frame set for a scene.
    pub fn new(scene_index: usize) -> Self {
        Self {
            scene_index,
            images: Vec::new(),
            seeds: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Record (or replace) the image for a position.
    pub fn record(&mut self, position: FramePosition, url: impl Into<String>, seed: u32) {
        let url = url.into();
        match self.positions.binary_search(&position) {
            Ok(i) => {
                if let (Some(image), Some(stored)) =
                    (self.images.get_mut(i), self.seeds.get_mut(i))
                {
                    *image = url;
                    *stored = seed;
                }
            }
            Err(i) => {
                self.positions.insert(i, position);
                self.images.insert(i, url);
                self.seeds.insert(i, seed);
            }
        }
    }

    /// Seed stored for a position.
    pub fn seed_for(&self, position: FramePosition) -> Option<u32> {
        self.positions
            .binary_search(&position)
            .ok()
            .and_then(|i| self.seeds.get(i).copied())
    }

    /// Image URL stored for a position.
    pub fn image_for(&self, position: FramePosition) -> Option<&str> {
        self.positions
            .binary_search(&position)
            .ok()
            .and_then(|i| self.images.get(i).map(String::as_str))
    }

    /// True when no image has been recorded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Motion clip produced for one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedClip {
    /// Scene this clip belongs to
    pub scene_index: usize,
    /// Clip URL
    pub url: String,
}
