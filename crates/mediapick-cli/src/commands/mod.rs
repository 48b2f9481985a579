pub mod config;
pub mod crop;
pub mod info;

use std::path::Path;

use anyhow::{Context, Result};
use mediapick_core::config::CropConfig;
use mediapick_core::crop::aspect::AspectMode;

/// Parse a `WIDTHxHEIGHT` view size.
pub fn parse_view(s: &str) -> std::result::Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f32 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let h: f32 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(format!("view size must be positive, got '{s}'"));
    }
    Ok((w, h))
}

pub fn parse_aspect(s: &str) -> std::result::Result<AspectMode, String> {
    s.parse().map_err(|e: mediapick_core::error::MediaPickError| e.to_string())
}

pub fn load_config(path: Option<&Path>) -> Result<CropConfig> {
    match path {
        Some(p) => CropConfig::load(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(CropConfig::default()),
    }
}
