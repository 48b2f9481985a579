/// Distance (screen units) within which a touch grabs a corner or edge handle.
pub const DEFAULT_TOUCH_THRESHOLD: f32 = 20.0;

/// Smallest edge length (screen units) the crop rectangle may shrink to.
pub const DEFAULT_MIN_RECT_LENGTH: f32 = 60.0;

/// Margin kept between the view border and the resting crop rectangle.
pub const DEFAULT_VIEW_MARGIN: f32 = 60.0;

/// Maximum zoom relative to the source image's longer side.
/// The crop may never cover fewer than `max(w, h) / MAX_SCALE` source pixels.
pub const DEFAULT_MAX_SCALE: f32 = 15.0;

/// Zoom factor applied by a double-tap.
pub const DEFAULT_DOUBLE_TAP_SCALE_FACTOR: f32 = 2.0;

/// Duration of settle / converge animations, in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;

/// Long-edge bound used when downscaling a decoded source image.
pub const DEFAULT_MAX_DECODE_DIMENSION: u32 = 1024;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-6;

/// Tolerance used when comparing mapped rectangles against the view or image.
pub const GEOMETRY_TOLERANCE: f32 = 1e-3;

/// Widest accepted `W:H` ratio, and the reciprocal of the tallest.
pub const MAX_ASPECT_RATIO: f32 = 10.0;
