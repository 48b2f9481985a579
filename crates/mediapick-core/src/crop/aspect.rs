use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_ASPECT_RATIO;
use crate::error::MediaPickError;

/// A fixed width:height ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width_ratio: f32,
    pub height_ratio: f32,
}

impl AspectRatio {
    pub const SQUARE: AspectRatio = AspectRatio::new(1.0, 1.0);
    pub const PORTRAIT_4_5: AspectRatio = AspectRatio::new(4.0, 5.0);
    pub const WIDE_16_9: AspectRatio = AspectRatio::new(16.0, 9.0);
    pub const TALL_9_16: AspectRatio = AspectRatio::new(9.0, 16.0);

    /// The selectable presets, in display order.
    pub const PRESETS: &[AspectRatio] = &[
        Self::SQUARE,
        Self::PORTRAIT_4_5,
        Self::WIDE_16_9,
        Self::TALL_9_16,
    ];

    pub const fn new(width_ratio: f32, height_ratio: f32) -> Self {
        Self {
            width_ratio,
            height_ratio,
        }
    }

    /// width / height
    pub fn value(&self) -> f32 {
        self.width_ratio / self.height_ratio
    }

    /// Height matching `width` under this ratio.
    pub fn height_for(&self, width: f32) -> f32 {
        width * self.height_ratio / self.width_ratio
    }

    /// Width matching `height` under this ratio.
    pub fn width_for(&self, height: f32) -> f32 {
        height * self.width_ratio / self.height_ratio
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width_ratio, self.height_ratio)
    }
}

/// Whether the crop rectangle's ratio is free or locked to a preset.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectMode {
    #[default]
    Free,
    Locked(AspectRatio),
}

impl AspectMode {
    /// Free followed by every preset.
    pub fn catalog() -> Vec<AspectMode> {
        std::iter::once(AspectMode::Free)
            .chain(AspectRatio::PRESETS.iter().copied().map(AspectMode::Locked))
            .collect()
    }

    pub fn ratio(&self) -> Option<AspectRatio> {
        match self {
            AspectMode::Free => None,
            AspectMode::Locked(r) => Some(*r),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, AspectMode::Locked(_))
    }
}

impl fmt::Display for AspectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectMode::Free => write!(f, "Free"),
            AspectMode::Locked(r) => write!(f, "{r}"),
        }
    }
}

impl FromStr for AspectMode {
    type Err = MediaPickError;

    /// Parses `free` or `W:H` with positive finite parts, at most
    /// [`MAX_ASPECT_RATIO`] wide or tall.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("free") {
            return Ok(AspectMode::Free);
        }
        let invalid = || MediaPickError::Config(format!("Invalid aspect ratio '{s}'"));
        let (w, h) = s.split_once(':').ok_or_else(invalid)?;
        let w: f32 = w.trim().parse().map_err(|_| invalid())?;
        let h: f32 = h.trim().parse().map_err(|_| invalid())?;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(invalid());
        }
        let ratio = w / h;
        if ratio > MAX_ASPECT_RATIO || ratio < 1.0 / MAX_ASPECT_RATIO {
            return Err(invalid());
        }
        Ok(AspectMode::Locked(AspectRatio::new(w, h)))
    }
}
