pub mod affine;
pub mod rect;
pub mod tween;

pub use affine::Affine;
pub use rect::{Point, RectF};
pub use tween::{Animated, Lerp, Tween};
