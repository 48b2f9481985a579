//! Source-pixel to screen transform of the displayed image.
//!
//! Kept as uniform scale + translation in practice. Gestures act on the
//! displayed matrix; convergence and settle animate towards a target.

use std::time::Duration;

use crate::consts::{EPSILON, GEOMETRY_TOLERANCE};
use crate::geometry::{Affine, Animated, Point, RectF};

#[derive(Clone, Debug)]
pub struct BitmapTransform {
    matrix: Animated<Affine>,
}

impl Default for BitmapTransform {
    fn default() -> Self {
        Self::new(Affine::IDENTITY)
    }
}

impl BitmapTransform {
    pub fn new(matrix: Affine) -> Self {
        Self {
            matrix: Animated::new(matrix),
        }
    }

    /// Matrix as currently displayed.
    pub fn matrix(&self) -> Affine {
        self.matrix.get()
    }

    /// Matrix once any running animation settles.
    pub fn resting(&self) -> Affine {
        self.matrix.resting()
    }

    pub fn reset(&mut self, matrix: Affine) {
        self.matrix.set(matrix);
    }

    pub fn is_animating(&self) -> bool {
        self.matrix.is_animating()
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        self.matrix.advance(dt)
    }

    pub fn finish(&mut self) {
        self.matrix.finish();
    }

    pub fn animate_to(&mut self, target: Affine, duration: Duration) {
        self.matrix.animate_to(target, duration);
    }

    /// Pan by a screen-space delta. No bounds are enforced here.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.matrix
            .update(|m| *m = m.then(&Affine::translation(dx, dy)));
    }

    /// Scale about a screen-space focus point, keeping that point fixed.
    pub fn scale_about(&mut self, factor: f32, focus: Point) {
        self.matrix
            .update(|m| *m = m.then(&Affine::scale_about(factor, focus)));
    }

    /// Animate a zoom by `factor` about a screen-space point.
    pub fn animate_scale_to_point(&mut self, factor: f32, focus: Point, duration: Duration) {
        let target = self.resting().then(&Affine::scale_about(factor, focus));
        self.matrix.animate_to(target, duration);
    }

    /// Screen-space extent of the source image.
    pub fn mapped(&self, source: &RectF) -> RectF {
        self.matrix().map_rect(source)
    }

    /// Map a screen-space rectangle back into source pixels.
    pub fn to_source(&self, screen: &RectF) -> Option<RectF> {
        self.matrix().invert().map(|inv| inv.map_rect(screen))
    }

    /// True when zooming in by `factor` would leave `crop` covering no more
    /// than `min_source_size` source pixels on its shorter side.
    pub fn would_exceed_zoom(&self, factor: f32, crop: &RectF, min_source_size: f32) -> bool {
        let candidate = Affine::scale(factor, factor).then(&self.matrix());
        match candidate.invert() {
            Some(inv) => {
                let on_source = inv.map_rect(crop);
                on_source.width().min(on_source.height()) <= min_source_size
            }
            None => true,
        }
    }
}

/// Transform that scales `source` to cover `target` and centers it there.
pub fn cover_fit(source: &RectF, target: &RectF) -> Option<Affine> {
    if source.width() <= EPSILON || source.height() <= EPSILON {
        return None;
    }
    let scale = (target.width() / source.width()).max(target.height() / source.height());
    let tx = target.center_x() - source.center_x() * scale;
    let ty = target.center_y() - source.center_y() * scale;
    Some(Affine::scale_translate(scale, tx, ty))
}

/// Transform that scales `source` to fit inside `target` and centers it there.
pub fn contain_fit(source: &RectF, target: &RectF) -> Option<Affine> {
    if source.width() <= EPSILON || source.height() <= EPSILON {
        return None;
    }
    let scale = (target.width() / source.width()).min(target.height() / source.height());
    let tx = target.center_x() - source.center_x() * scale;
    let ty = target.center_y() - source.center_y() * scale;
    Some(Affine::scale_translate(scale, tx, ty))
}

/// Smallest correction of `matrix` that makes the mapped `source` cover `crop`.
///
/// Scales by `max(1, crop / mapped)` about the crop center, then translates
/// the nearest gap shut. Returns `matrix` unchanged when nothing is uncovered.
pub fn settle(matrix: &Affine, source: &RectF, crop: &RectF) -> Affine {
    let dragged = matrix.map_rect(source);
    if dragged.width() <= EPSILON || dragged.height() <= EPSILON {
        return *matrix;
    }

    let width_scale = crop.width() / dragged.width();
    let height_scale = crop.height() / dragged.height();
    let limit = 1.0 + GEOMETRY_TOLERANCE;
    let scale = if width_scale > limit || height_scale > limit {
        width_scale.max(height_scale)
    } else {
        1.0
    };

    let pivot = crop.center();
    let scaled = dragged.scaled_about(scale, pivot);

    // gaps below the tolerance are rounding noise
    let mut dx = 0.0;
    if scaled.left > crop.left + GEOMETRY_TOLERANCE {
        dx = crop.left - scaled.left;
    }
    if scaled.right < crop.right - GEOMETRY_TOLERANCE {
        dx = crop.right - scaled.right;
    }

    let mut dy = 0.0;
    if scaled.top > crop.top + GEOMETRY_TOLERANCE {
        dy = crop.top - scaled.top;
    }
    if scaled.bottom < crop.bottom - GEOMETRY_TOLERANCE {
        dy = crop.bottom - scaled.bottom;
    }

    if scale == 1.0 && dx == 0.0 && dy == 0.0 {
        return *matrix;
    }

    matrix
        .then(&Affine::scale_about(scale, pivot))
        .then(&Affine::translation(dx, dy))
}
