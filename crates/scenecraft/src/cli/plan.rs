//! Planning, prompt preview and cost estimate handlers.

use super::commands::{AudioArgs, OutputFormat};
use scenecraft::{
    Dimension, JsonError, PriceTable, ScenecraftConfig, ScenecraftResult, StyleSelection,
    compose_image_prompt, compose_style_guide, compose_video_prompt, estimate_cost, lookup,
    plan_scenes, scene_count,
};
use tracing::instrument;

fn print_json<T: serde::Serialize>(value: &T) -> ScenecraftResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Print the planned scenes.
#[instrument(skip(config))]
pub fn run_plan(
    config: &ScenecraftConfig,
    duration: Option<u32>,
    scenes: Option<usize>,
    format: OutputFormat,
) -> ScenecraftResult<()> {
    let duration = duration.unwrap_or(config.planner.default_duration_seconds);
    let clip = config.planner.clip_seconds;
    let planned = plan_scenes(duration, clip, scenes, &StyleSelection::default());

    match format {
        OutputFormat::Json => print_json(&planned)?,
        OutputFormat::Human => {
            println!(
                "{} scenes for {}s ({}s per clip)",
                planned.len(),
                duration,
                clip
            );
            println!("{:-<80}", "");
            for scene in &planned {
                let s = &scene.settings;
                println!(
                    "Scene {}: {} / {} / {} / {} pacing / {} transition",
                    scene.index + 1,
                    lookup(Dimension::ShotSize, &s.shot_size).label,
                    lookup(Dimension::CameraAngle, &s.camera_angle).label,
                    lookup(Dimension::CameraMovement, &s.camera_movement).label,
                    lookup(Dimension::Pacing, &s.pacing).label,
                    lookup(Dimension::TransitionStyle, &s.transition_style).label,
                );
            }
        }
    }
    Ok(())
}

/// Print the style guide and each scene's image and video blocks.
#[instrument(skip(config))]
pub fn run_prompts(
    config: &ScenecraftConfig,
    topic: &str,
    duration: Option<u32>,
) -> ScenecraftResult<()> {
    let duration = duration.unwrap_or(config.planner.default_duration_seconds);
    let style = StyleSelection::default();
    let planned = plan_scenes(duration, config.planner.clip_seconds, None, &style);

    println!("Topic: {}", topic.trim());
    println!();
    println!("{}", compose_style_guide(&style));
    for scene in &planned {
        println!("{:-<80}", "");
        println!("Scene {}", scene.index + 1);
        println!("[image]\n{}", compose_image_prompt(&style, &scene.settings));
        println!("[video]\n{}", compose_video_prompt(&style, &scene.settings));
    }
    Ok(())
}

/// Print the cost estimate for the configured models.
#[instrument(skip(config, audio))]
pub fn run_estimate(
    config: &ScenecraftConfig,
    duration: Option<u32>,
    scenes: Option<usize>,
    audio: &AudioArgs,
    format: OutputFormat,
) -> ScenecraftResult<()> {
    let duration = duration.unwrap_or(config.planner.default_duration_seconds);
    let clip = config.planner.clip_seconds;
    let count = scene_count(duration, clip, scenes);
    let prices = PriceTable::resolve(&config.pricing, &config.models.preferences());
    let estimate = estimate_cost(count, clip, &prices, &audio.to_options());

    match format {
        OutputFormat::Json => print_json(&estimate)?,
        OutputFormat::Human => {
            let c = &estimate.per_category;
            println!("Estimate for {} scenes of {}s", count, clip);
            println!("{:-<48}", "");
            for (name, cost) in [
                ("text", c.text),
                ("image", c.image),
                ("video", c.video),
                ("music", c.music),
            ] {
                println!("{:<8} {:>12.4} - {:<12.4}", name, cost.low, cost.high);
            }
            println!("{:-<48}", "");
            println!(
                "{:<8} {:>12.4} - {:<12.4}",
                "total", estimate.display_low, estimate.display_high
            );
        }
    }
    Ok(())
}
