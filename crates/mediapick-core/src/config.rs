use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_DOUBLE_TAP_SCALE_FACTOR, DEFAULT_MAX_DECODE_DIMENSION,
    DEFAULT_MAX_SCALE, DEFAULT_MIN_RECT_LENGTH, DEFAULT_TOUCH_THRESHOLD, DEFAULT_VIEW_MARGIN,
};
use crate::crop::aspect::AspectMode;
use crate::error::{MediaPickError, Result};

/// Tunables for the crop editor and its image supply.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CropConfig {
    /// Distance (screen units) within which a touch grabs a handle.
    #[serde(default = "default_touch_threshold")]
    pub touch_threshold: f32,
    /// Smallest crop edge length in screen units.
    #[serde(default = "default_min_rect_length")]
    pub min_rect_length: f32,
    /// Margin between the view border and the resting crop rectangle.
    #[serde(default = "default_view_margin")]
    pub view_margin: f32,
    /// Zoom ceiling: the crop never covers fewer than `max(w, h) / max_scale` source pixels.
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
    #[serde(default = "default_double_tap_scale_factor")]
    pub double_tap_scale_factor: f32,
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,
    /// Long-edge bound for decoded source images.
    #[serde(default = "default_max_decode_dimension")]
    pub max_decode_dimension: u32,
    /// Aspect selected when a session starts, `free` or `W:H`.
    #[serde(default = "default_aspect")]
    pub default_aspect: String,
}

fn default_touch_threshold() -> f32 {
    DEFAULT_TOUCH_THRESHOLD
}
fn default_min_rect_length() -> f32 {
    DEFAULT_MIN_RECT_LENGTH
}
fn default_view_margin() -> f32 {
    DEFAULT_VIEW_MARGIN
}
fn default_max_scale() -> f32 {
    DEFAULT_MAX_SCALE
}
fn default_double_tap_scale_factor() -> f32 {
    DEFAULT_DOUBLE_TAP_SCALE_FACTOR
}
fn default_animation_duration_ms() -> u64 {
    DEFAULT_ANIMATION_DURATION_MS
}
fn default_max_decode_dimension() -> u32 {
    DEFAULT_MAX_DECODE_DIMENSION
}
fn default_aspect() -> String {
    "1:1".into()
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            touch_threshold: DEFAULT_TOUCH_THRESHOLD,
            min_rect_length: DEFAULT_MIN_RECT_LENGTH,
            view_margin: DEFAULT_VIEW_MARGIN,
            max_scale: DEFAULT_MAX_SCALE,
            double_tap_scale_factor: DEFAULT_DOUBLE_TAP_SCALE_FACTOR,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            max_decode_dimension: DEFAULT_MAX_DECODE_DIMENSION,
            default_aspect: default_aspect(),
        }
    }
}

impl CropConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: CropConfig =
            toml::from_str(s).map_err(|e| MediaPickError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MediaPickError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("touch_threshold", self.touch_threshold),
            ("min_rect_length", self.min_rect_length),
            ("max_scale", self.max_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MediaPickError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.view_margin.is_finite() && self.view_margin >= 0.0) {
            return Err(MediaPickError::Config(format!(
                "view_margin must be non-negative, got {}",
                self.view_margin
            )));
        }
        if !(self.double_tap_scale_factor.is_finite() && self.double_tap_scale_factor > 1.0) {
            return Err(MediaPickError::Config(format!(
                "double_tap_scale_factor must be greater than 1, got {}",
                self.double_tap_scale_factor
            )));
        }
        if self.max_decode_dimension == 0 {
            return Err(MediaPickError::Config(
                "max_decode_dimension must be > 0".into(),
            ));
        }
        self.aspect_mode()?;
        Ok(())
    }

    pub fn aspect_mode(&self) -> Result<AspectMode> {
        self.default_aspect.parse()
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}
