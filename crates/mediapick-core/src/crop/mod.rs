pub mod aspect;
pub mod bounds;
pub mod controller;
pub mod extract;
pub mod transform;

pub use aspect::{AspectMode, AspectRatio};
pub use controller::{CropController, DragBounds, DragState, TouchEvent};
pub use hit_test::{Corner, Edge, Handle};
