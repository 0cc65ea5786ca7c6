//! Cost estimation.
//!
//! A best-effort projection recomputed on every configuration change. Pure
//! arithmetic, no I/O.

use scenecraft_core::{AudioOptions, GenerationKind, ModelPreferences};
use scenecraft_invoke::PricingConfig;
use serde::Serialize;
use tracing::debug;

/// Images generated per scene (start and end frame).
pub const IMAGES_PER_SCENE: u32 = 2;

/// Unit prices for the selected models.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriceTable {
    /// Price per text call
    pub text_per_call: f64,
    /// Price per image
    pub image_per_image: f64,
    /// Price per clip second without generated audio
    pub video_per_second_low: f64,
    /// Price per clip second with generated audio
    pub video_per_second_high: f64,
    /// Price per music second
    pub music_per_second: f64,
    /// Multiplier into the display currency
    pub currency_factor: f64,
    /// Fractional headroom for retried calls
    pub retry_margin: f64,
}

impl PriceTable {
    /// Resolve prices for the selected models.
    ///
    /// Models without a configured price cost nothing in the estimate.
    pub fn resolve(pricing: &PricingConfig, preferences: &ModelPreferences) -> Self {
        let price = |table: &std::collections::HashMap<String, f64>, kind: GenerationKind| {
            let model = preferences.model_for(kind);
            table.get(model).copied().unwrap_or_else(|| {
                debug!(%kind, model, "No price configured for model");
                0.0
            })
        };
        let video_model = preferences.model_for(GenerationKind::Video);
        let video = pricing.video.get(video_model).copied().unwrap_or_else(|| {
            debug!(model = video_model, "No price configured for video model");
            Default::default()
        });

        Self {
            text_per_call: price(&pricing.text, GenerationKind::Text),
            image_per_image: price(&pricing.image, GenerationKind::Image),
            video_per_second_low: video.low,
            video_per_second_high: video.high,
            music_per_second: price(&pricing.music, GenerationKind::Music),
            currency_factor: pricing.currency_factor,
            retry_margin: pricing.retry_margin,
        }
    }
}

/// Low and high projection for one category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CategoryCost {
    /// Projection with every call succeeding first time
    pub low: f64,
    /// Projection with optional passes and retry headroom
    pub high: f64,
}

/// Projection per category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostBreakdown {
    /// Script and dialogue calls
    pub text: CategoryCost,
    /// Still frames
    pub image: CategoryCost,
    /// Motion clips
    pub video: CategoryCost,
    /// Background music
    pub music: CategoryCost,
}

/// Result of [`estimate_cost`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostEstimate {
    /// Per-category projection in base units
    pub per_category: CostBreakdown,
    /// Sum of the low projections
    pub total_low: f64,
    /// Sum of the high projections
    pub total_high: f64,
    /// `total_low` in the display currency
    pub display_low: f64,
    /// `total_high` in the display currency
    pub display_high: f64,
}

/// Project the cost of generating a draft.
///
/// - text: one script call; the high projection adds the dialogue pass when
///   narration is enabled
/// - image: two images per scene
/// - video: per-second price times clip length per scene, high tier when
///   clips carry audio
/// - music: per-second price over the total video length, when enabled
///
/// Every high projection also carries the retry margin.
///
/// # Examples
///
/// ```
/// use scenecraft_core::AudioOptions;
/// use scenecraft_pipeline::{PriceTable, estimate_cost};
///
/// let prices = PriceTable {
///     image_per_image: 0.5,
///     currency_factor: 1.0,
///     ..Default::default()
/// };
/// let estimate = estimate_cost(3, 8, &prices, &AudioOptions::default());
/// assert_eq!(estimate.per_category.image.low, 3.0);
/// ```
pub fn estimate_cost(
    scene_count: usize,
    per_scene_max_seconds: u32,
    prices: &PriceTable,
    audio: &AudioOptions,
) -> CostEstimate {
    let scenes = scene_count as f64;
    let seconds = f64::from(per_scene_max_seconds);
    let headroom = 1.0 + prices.retry_margin.max(0.0);
    let with_headroom = |low: f64| CategoryCost {
        low,
        high: low * headroom,
    };

    let text_calls_high = if audio.narration.enabled { 2.0 } else { 1.0 };
    let text = CategoryCost {
        low: prices.text_per_call,
        high: prices.text_per_call * text_calls_high * headroom,
    };

    let image = with_headroom(prices.image_per_image * f64::from(IMAGES_PER_SCENE) * scenes);

    let video_rate = if audio.clips_have_audio() {
        prices.video_per_second_high
    } else {
        prices.video_per_second_low
    };
    let video = with_headroom(video_rate * seconds * scenes);

    let music = if audio.music.enabled {
        with_headroom(prices.music_per_second * seconds * scenes)
    } else {
        CategoryCost::default()
    };

    let per_category = CostBreakdown {
        text,
        image,
        video,
        music,
    };
    let total_low = text.low + image.low + video.low + music.low;
    let total_high = text.high + image.high + video.high + music.high;

    CostEstimate {
        per_category,
        total_low,
        total_high,
        display_low: total_low * prices.currency_factor,
        display_high: total_high * prices.currency_factor,
    }
}
