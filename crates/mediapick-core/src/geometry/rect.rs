use serde::{Deserialize, Serialize};

/// A point in screen or source-pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle stored as edges, y growing downwards.
///
/// Edges may transiently cross (`left > right`) while a drag is being
/// applied; bound enforcement restores the ordering before the rectangle is
/// observed again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Rectangle of the given size centered on `center`.
    pub fn from_center_size(center: Point, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// True when every edge is finite and the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite())
            && !self.is_empty()
    }

    /// Whether `other` lies inside `self`, allowing `tolerance` of slack per edge.
    pub fn contains_rect(&self, other: &RectF, tolerance: f32) -> bool {
        other.left >= self.left - tolerance
            && other.top >= self.top - tolerance
            && other.right <= self.right + tolerance
            && other.bottom <= self.bottom + tolerance
    }

    /// Overlap of the two rectangles, or `None` when they do not overlap.
    pub fn intersection(&self, other: &RectF) -> Option<RectF> {
        let r = RectF::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if r.is_empty() {
            None
        } else {
            Some(r)
        }
    }

    /// Scale the rectangle uniformly about an anchor point.
    pub fn scaled_about(&self, scale: f32, anchor: Point) -> RectF {
        RectF::new(
            anchor.x + (self.left - anchor.x) * scale,
            anchor.y + (self.top - anchor.y) * scale,
            anchor.x + (self.right - anchor.x) * scale,
            anchor.y + (self.bottom - anchor.y) * scale,
        )
    }
}
