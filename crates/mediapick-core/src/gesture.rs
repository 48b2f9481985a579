//! Scripted touch input, for driving a crop without a touch screen.
//!
//! ```toml
//! [[step]]
//! action = "down"
//! x = 120.0
//! y = 80.0
//!
//! [[step]]
//! action = "move"
//! x = 90.0
//! y = 60.0
//!
//! [[step]]
//! action = "up"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crop::aspect::AspectMode;
use crate::crop::controller::{CropController, TouchEvent};
use crate::error::{MediaPickError, Result};
use crate::geometry::Point;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Upper bound on frames spent settling animations at the end of a replay.
const MAX_SETTLE_FRAMES: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GestureStep {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Pinch { factor: f32, x: f32, y: f32 },
    DoubleTap { x: f32, y: f32 },
    /// `free` or `W:H`
    Aspect { ratio: String },
    /// Let animations run for this long.
    Wait { ms: u64 },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    #[serde(default, rename = "step")]
    pub steps: Vec<GestureStep>,
}

impl GestureScript {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MediaPickError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Feed every step to `controller`, then run animations to completion.
    pub fn replay(&self, controller: &mut CropController) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            debug!(index = i, ?step, "Gesture step");
            match step {
                GestureStep::Down { x, y } => controller.handle(TouchEvent::Down(Point::new(*x, *y))),
                GestureStep::Move { x, y } => controller.handle(TouchEvent::Move(Point::new(*x, *y))),
                GestureStep::Up => controller.handle(TouchEvent::Up),
                GestureStep::Pinch { factor, x, y } => controller.handle(TouchEvent::Pinch {
                    factor: *factor,
                    focus: Point::new(*x, *y),
                }),
                GestureStep::DoubleTap { x, y } => {
                    controller.handle(TouchEvent::DoubleTap(Point::new(*x, *y)))
                }
                GestureStep::Aspect { ratio } => {
                    let mode: AspectMode = ratio.parse()?;
                    controller.set_aspect_mode(mode);
                }
                GestureStep::Wait { ms } => {
                    let mut left = Duration::from_millis(*ms);
                    while !left.is_zero() {
                        let dt = left.min(FRAME_INTERVAL);
                        controller.advance(dt);
                        left -= dt;
                    }
                }
            }
        }

        let mut frames = 0;
        while controller.advance(FRAME_INTERVAL) && frames < MAX_SETTLE_FRAMES {
            frames += 1;
        }
        controller.finish_animations();
        Ok(())
    }
}
