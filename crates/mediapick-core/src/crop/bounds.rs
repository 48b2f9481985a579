//! Per-gesture bounds for handle drags.
//!
//! Both rectangles are computed once at touch-down from the crop rectangle
//! as it was then, and are applied to every move of the same gesture: first
//! [`clamp_to_max`], then [`clamp_to_min`], so the minimum wins when the two
//! disagree.

use crate::consts::EPSILON;
use crate::crop::aspect::AspectMode;
use crate::crop::hit_test::{Corner, Edge, Handle};
use crate::geometry::{Point, RectF};

/// Point that stays fixed while `handle` is dragged in aspect-locked mode.
pub fn anchor(rect: &RectF, handle: Handle) -> Point {
    match handle {
        Handle::Corner(corner) => corner.opposite().point(rect),
        Handle::Edge(edge) => edge.opposite().midpoint(rect),
    }
}

/// Smallest rectangle the crop may shrink to while `handle` is dragged.
pub fn min_rect(crop: &RectF, handle: Handle, mode: AspectMode, min_size: f32) -> RectF {
    if mode.is_locked() {
        if crop.width() <= EPSILON || crop.height() <= EPSILON {
            return *crop;
        }
        let scale = (min_size / crop.width()).max(min_size / crop.height());
        return crop.scaled_about(scale, anchor(crop, handle));
    }

    let RectF {
        left,
        top,
        right,
        bottom,
    } = *crop;
    match handle {
        Handle::Edge(Edge::Left) => RectF::new(right - min_size, top, right, bottom),
        Handle::Edge(Edge::Top) => RectF::new(left, bottom - min_size, right, bottom),
        Handle::Edge(Edge::Right) => RectF::new(left, top, left + min_size, bottom),
        Handle::Edge(Edge::Bottom) => RectF::new(left, top, right, top + min_size),
        Handle::Corner(Corner::TopRight) => {
            RectF::new(left, bottom - min_size, left + min_size, bottom)
        }
        Handle::Corner(Corner::TopLeft) => {
            RectF::new(right - min_size, bottom - min_size, right, bottom)
        }
        Handle::Corner(Corner::BottomRight) => {
            RectF::new(left, top, left + min_size, top + min_size)
        }
        Handle::Corner(Corner::BottomLeft) => {
            RectF::new(right - min_size, top, right, top + min_size)
        }
    }
}

/// Largest rectangle the crop may grow to while `handle` is dragged.
///
/// `border` is the displayed image extent intersected with the view.
pub fn max_rect(crop: &RectF, handle: Handle, mode: AspectMode, border: &RectF) -> RectF {
    let RectF {
        left,
        top,
        right,
        bottom,
    } = *crop;

    if !mode.is_locked() {
        return match handle {
            Handle::Edge(Edge::Left) => RectF::new(border.left, top, right, bottom),
            Handle::Edge(Edge::Top) => RectF::new(left, border.top, right, bottom),
            Handle::Edge(Edge::Right) => RectF::new(left, top, border.right, bottom),
            Handle::Edge(Edge::Bottom) => RectF::new(left, top, right, border.bottom),
            Handle::Corner(Corner::TopRight) => {
                RectF::new(left, border.top, border.right, bottom)
            }
            Handle::Corner(Corner::TopLeft) => {
                RectF::new(border.left, border.top, right, bottom)
            }
            Handle::Corner(Corner::BottomRight) => {
                RectF::new(left, top, border.right, border.bottom)
            }
            Handle::Corner(Corner::BottomLeft) => {
                RectF::new(border.left, top, right, border.bottom)
            }
        };
    }

    let w = crop.width();
    let h = crop.height();
    if w <= EPSILON || h <= EPSILON {
        return *crop;
    }

    let scale = match handle {
        Handle::Edge(edge) => {
            // perpendicular axis grows symmetrically about the center
            let half_left = (crop.center_x() - border.left) / (w / 2.0);
            let half_right = (border.right - crop.center_x()) / (w / 2.0);
            let half_top = (crop.center_y() - border.top) / (h / 2.0);
            let half_bottom = (border.bottom - crop.center_y()) / (h / 2.0);
            match edge {
                Edge::Left => ((right - border.left) / w).min(half_top).min(half_bottom),
                Edge::Right => ((border.right - left) / w).min(half_top).min(half_bottom),
                Edge::Top => ((bottom - border.top) / h).min(half_left).min(half_right),
                Edge::Bottom => ((border.bottom - top) / h).min(half_left).min(half_right),
            }
        }
        Handle::Corner(corner) => {
            let left_scale = (right - border.left) / w;
            let right_scale = (border.right - left) / w;
            let top_scale = (bottom - border.top) / h;
            let bottom_scale = (border.bottom - top) / h;
            match corner {
                Corner::TopRight => right_scale.min(top_scale),
                Corner::TopLeft => left_scale.min(top_scale),
                Corner::BottomRight => right_scale.min(bottom_scale),
                Corner::BottomLeft => left_scale.min(bottom_scale),
            }
        }
    };

    crop.scaled_about(scale, anchor(crop, handle))
}

/// Pull any edge that overshoots `max` back onto it.
pub fn clamp_to_max(crop: &mut RectF, max: &RectF) {
    if crop.left < max.left {
        crop.left = max.left;
    }
    if crop.top < max.top {
        crop.top = max.top;
    }
    if crop.right > max.right {
        crop.right = max.right;
    }
    if crop.bottom > max.bottom {
        crop.bottom = max.bottom;
    }
}

/// Push any edge that has moved inside `min` back out onto it.
pub fn clamp_to_min(crop: &mut RectF, min: &RectF) {
    if crop.left > min.left {
        crop.left = min.left;
    }
    if crop.top > min.top {
        crop.top = min.top;
    }
    if crop.right < min.right {
        crop.right = min.right;
    }
    if crop.bottom < min.bottom {
        crop.bottom = min.bottom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::aspect::AspectRatio;
    use approx::assert_relative_eq;

    const CROP: RectF = RectF::new(100.0, 100.0, 300.0, 300.0);
    const BORDER: RectF = RectF::new(0.0, 50.0, 400.0, 500.0);

    #[test]
    fn test_free_min_pins_opposite_edge() {
        let m = min_rect(&CROP, Handle::Edge(Edge::Left), AspectMode::Free, 60.0);
        assert_eq!(m, RectF::new(240.0, 100.0, 300.0, 300.0));
    }

    #[test]
    fn test_locked_min_scales_about_anchor() {
        let mode = AspectMode::Locked(AspectRatio::SQUARE);
        let m = min_rect(&CROP, Handle::Corner(Corner::TopLeft), mode, 60.0);
        assert_eq!(m, RectF::new(240.0, 240.0, 300.0, 300.0));
    }

    #[test]
    fn test_free_max_extends_to_border() {
        let m = max_rect(&CROP, Handle::Corner(Corner::BottomRight), AspectMode::Free, &BORDER);
        assert_eq!(m, RectF::new(100.0, 100.0, 400.0, 500.0));
    }

    #[test]
    fn test_locked_max_limited_by_tightest_side() {
        let mode = AspectMode::Locked(AspectRatio::SQUARE);
        // top-left anchored at (300, 300): left allows 300/200, top allows 250/200
        let m = max_rect(&CROP, Handle::Corner(Corner::TopLeft), mode, &BORDER);
        assert_relative_eq!(m.left, 50.0, epsilon = 1e-3);
        assert_relative_eq!(m.top, 50.0, epsilon = 1e-3);
        assert_eq!(m.right, 300.0);
        assert_eq!(m.bottom, 300.0);
    }

    #[test]
    fn test_clamp_order_min_wins() {
        let mut crop = RectF::new(10.0, 10.0, 20.0, 20.0);
        let max = RectF::new(0.0, 0.0, 15.0, 15.0);
        let min = RectF::new(0.0, 0.0, 18.0, 18.0);
        clamp_to_max(&mut crop, &max);
        clamp_to_min(&mut crop, &min);
        assert_eq!(crop, RectF::new(0.0, 0.0, 18.0, 18.0));
    }
}
