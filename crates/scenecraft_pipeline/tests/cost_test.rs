use scenecraft_core::{AudioOptions, ModelPreferences};
use scenecraft_invoke::ScenecraftConfig;
use scenecraft_pipeline::{PriceTable, estimate_cost};

fn prices() -> PriceTable {
    PriceTable {
        text_per_call: 0.01,
        image_per_image: 0.04,
        video_per_second_low: 0.05,
        video_per_second_high: 0.10,
        music_per_second: 0.002,
        currency_factor: 1.5,
        retry_margin: 0.25,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn doubling_scene_count_doubles_image_and_video() {
    let audio = AudioOptions::default();
    for scenes in [1usize, 2, 4, 7] {
        let single = estimate_cost(scenes, 8, &prices(), &audio);
        let double = estimate_cost(scenes * 2, 8, &prices(), &audio);

        let (one, two) = (single.per_category, double.per_category);
        assert!(approx(two.image.low, one.image.low * 2.0));
        assert!(approx(two.image.high, one.image.high * 2.0));
        assert!(approx(two.video.low, one.video.low * 2.0));
        assert!(approx(two.video.high, one.video.high * 2.0));
        assert!(approx(two.text.low, one.text.low));
    }
}

#[test]
fn video_uses_high_tier_when_clips_carry_audio() {
    let silent = estimate_cost(3, 8, &prices(), &AudioOptions::default());

    let mut audio = AudioOptions::default();
    audio.sound_effects.enabled = true;
    let loud = estimate_cost(3, 8, &prices(), &audio);

    assert!(approx(silent.per_category.video.low, 0.05 * 8.0 * 3.0));
    assert!(approx(loud.per_category.video.low, 0.10 * 8.0 * 3.0));
}

#[test]
fn narration_doubles_high_text_projection() {
    let mut audio = AudioOptions::default();
    audio.narration.enabled = true;
    let estimate = estimate_cost(2, 8, &prices(), &audio);

    assert!(approx(estimate.per_category.text.low, 0.01));
    assert!(approx(estimate.per_category.text.high, 0.01 * 2.0 * 1.25));
}

#[test]
fn music_covers_total_duration_only_when_enabled() {
    let off = estimate_cost(4, 8, &prices(), &AudioOptions::default());
    assert_eq!(off.per_category.music.low, 0.0);

    let mut audio = AudioOptions::default();
    audio.music.enabled = true;
    let on = estimate_cost(4, 8, &prices(), &audio);
    assert!(approx(on.per_category.music.low, 0.002 * 32.0));
}

#[test]
fn totals_and_display_currency() {
    let estimate = estimate_cost(2, 8, &prices(), &AudioOptions::default());
    let c = estimate.per_category;

    let low = c.text.low + c.image.low + c.video.low + c.music.low;
    let high = c.text.high + c.image.high + c.video.high + c.music.high;
    assert!(approx(estimate.total_low, low));
    assert!(approx(estimate.total_high, high));
    assert!(estimate.total_high >= estimate.total_low);
    assert!(approx(estimate.display_low, low * 1.5));
    assert!(approx(estimate.display_high, high * 1.5));
}

#[test]
fn price_table_resolves_from_bundled_config() {
    let config = ScenecraftConfig::bundled().unwrap();
    let table = PriceTable::resolve(&config.pricing, &ModelPreferences::default());

    assert!(approx(table.text_per_call, 0.002));
    assert!(approx(table.image_per_image, 0.04));
    assert!(approx(table.video_per_second_low, 0.05));
    assert!(approx(table.video_per_second_high, 0.10));
    assert!(approx(table.music_per_second, 0.002));
}

#[test]
fn unpriced_model_costs_nothing() {
    let config = ScenecraftConfig::bundled().unwrap();
    let preferences = ModelPreferences::default().with_image_model("image-unknown");
    let table = PriceTable::resolve(&config.pricing, &preferences);

    assert_eq!(table.image_per_image, 0.0);
}
