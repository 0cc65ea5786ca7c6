use scenecraft_core::GenerationKind;
use scenecraft_error::{PipelineErrorKind, ScenecraftErrorKind};
use scenecraft_invoke::{InvokerConfig, RetryPolicy, ScenecraftConfig, VideoPrice};
use std::io::Write;
use std::time::Duration;

#[test]
fn bundled_defaults_parse() {
    let config = ScenecraftConfig::bundled().expect("bundled config parses");

    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.backoff_step_ms, 2000);
    assert_eq!(config.planner.clip_seconds, 8);
    assert_eq!(config.history.archive_cap, 50);
    assert_eq!(config.history.quiet_period(), Duration::from_millis(1500));
    assert_eq!(config.invoker.api_key_env, "SCENECRAFT_API_KEY");

    let video = config.pricing.video.get("video-standard").expect("video price");
    assert!(video.high > video.low);
    assert!(config.pricing.text.contains_key("script-standard"));
    assert!(config.pricing.image.contains_key("image-standard"));
    assert!(config.pricing.music.contains_key("music-standard"));
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        r#"
[retry]
max_attempts = 5

[models]
image = "image-pro"
"#
    )
    .expect("write config");

    let config = ScenecraftConfig::from_file(file.path()).expect("config parses");

    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.backoff_step_ms, 2000);
    assert_eq!(config.planner.clip_seconds, 8);
    assert_eq!(config.models.image, "image-pro");
    assert_eq!(config.models.text, "script-standard");

    let preferences = config.models.preferences();
    assert_eq!(preferences.model_for(GenerationKind::Image), "image-pro");
    assert_eq!(preferences.model_for(GenerationKind::Video), "video-standard");
}

#[test]
fn missing_file_is_a_config_error() {
    let result = ScenecraftConfig::from_file("/definitely/not/here/scenecraft.toml");
    let err = result.expect_err("missing file");
    assert!(matches!(err.kind(), ScenecraftErrorKind::Config(_)));
}

#[test]
fn missing_credential_is_a_validation_failure() {
    let invoker = InvokerConfig {
        api_key_env: "SCENECRAFT_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        ..Default::default()
    };

    let err = invoker.api_key().expect_err("no credential");
    match err.kind() {
        ScenecraftErrorKind::Pipeline(e) => {
            assert_eq!(
                e.kind,
                PipelineErrorKind::MissingCredential(
                    "SCENECRAFT_TEST_KEY_THAT_IS_NEVER_SET".to_string()
                )
            );
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn retry_policy_follows_config() {
    let config = ScenecraftConfig::bundled().expect("bundled config parses");
    let policy = RetryPolicy::from(&config.retry);

    assert_eq!(*policy.max_attempts(), 3);
    assert_eq!(policy.backoff_for(1), Duration::from_secs(2));
    assert_eq!(policy.backoff_for(2), Duration::from_secs(4));
    assert_eq!(*policy.strip_delay(), Duration::from_millis(500));
}

#[test]
fn written_config_is_read_back() {
    let mut config = ScenecraftConfig::default();
    config.pricing.currency_factor = 0.92;
    config
        .pricing
        .video
        .insert("video-lab".to_string(), VideoPrice { low: 0.2, high: 0.5 });
    config.models.video = "video-lab".to_string();
    config.planner.clip_seconds = 6;

    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(toml::to_string(&config).expect("serialize").as_bytes())
        .expect("write config");

    let loaded = ScenecraftConfig::from_file(file.path()).expect("config parses");

    assert_eq!(loaded.planner.clip_seconds, 6);
    assert_eq!(loaded.models.video, "video-lab");
    assert_eq!(loaded.pricing.currency_factor, 0.92);
    assert_eq!(
        loaded.pricing.video.get("video-lab"),
        Some(&VideoPrice { low: 0.2, high: 0.5 })
    );
}
