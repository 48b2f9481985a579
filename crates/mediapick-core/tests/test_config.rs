use std::time::Duration;

use mediapick_core::config::CropConfig;
use mediapick_core::consts::{DEFAULT_MAX_SCALE, DEFAULT_TOUCH_THRESHOLD};
use mediapick_core::crop::aspect::{AspectMode, AspectRatio};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_config_is_valid() {
    let config = CropConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.touch_threshold, DEFAULT_TOUCH_THRESHOLD);
    assert_eq!(config.max_scale, DEFAULT_MAX_SCALE);
    assert_eq!(
        config.aspect_mode().unwrap(),
        AspectMode::Locked(AspectRatio::SQUARE)
    );
    assert_eq!(config.animation_duration(), Duration::from_millis(300));
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = CropConfig::from_toml_str("").unwrap();
    assert_eq!(config.min_rect_length, CropConfig::default().min_rect_length);
    assert_eq!(config.max_decode_dimension, 1024);
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_partial_toml_overrides() {
    let config = CropConfig::from_toml_str(
        r#"
        view_margin = 0.0
        default_aspect = "free"
        "#,
    )
    .unwrap();
    assert_eq!(config.view_margin, 0.0);
    assert_eq!(config.aspect_mode().unwrap(), AspectMode::Free);
    assert_eq!(config.touch_threshold, DEFAULT_TOUCH_THRESHOLD);
}

#[test]
fn test_toml_roundtrip_through_file() {
    let config = CropConfig {
        default_aspect: "16:9".into(),
        animation_duration_ms: 0,
        ..CropConfig::default()
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crop.toml");
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

    let loaded = CropConfig::load(&path).unwrap();
    assert_eq!(loaded.default_aspect, "16:9");
    assert_eq!(loaded.animation_duration(), Duration::ZERO);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_rejects_non_positive_values() {
    assert!(CropConfig::from_toml_str("touch_threshold = 0.0").is_err());
    assert!(CropConfig::from_toml_str("max_scale = -1.0").is_err());
    assert!(CropConfig::from_toml_str("view_margin = -5.0").is_err());
    assert!(CropConfig::from_toml_str("double_tap_scale_factor = 1.0").is_err());
    assert!(CropConfig::from_toml_str("max_decode_dimension = 0").is_err());
}

#[test]
fn test_rejects_bad_aspect() {
    assert!(CropConfig::from_toml_str("default_aspect = \"wide\"").is_err());
    assert!(CropConfig::from_toml_str("default_aspect = \"3:0\"").is_err());
}

#[test]
fn test_rejects_wrong_types() {
    assert!(CropConfig::from_toml_str("touch_threshold = \"big\"").is_err());
}
