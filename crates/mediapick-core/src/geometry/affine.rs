use serde::{Deserialize, Serialize};

use super::rect::{Point, RectF};
use crate::consts::EPSILON;

/// 2D affine transform.
///
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0  1  |
/// ```
///
/// `x' = a*x + c*y + tx`, `y' = b*x + d*y + ty`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Uniform scale that keeps `pivot` fixed.
    pub fn scale_about(scale: f32, pivot: Point) -> Self {
        Self {
            a: scale,
            d: scale,
            tx: pivot.x - scale * pivot.x,
            ty: pivot.y - scale * pivot.y,
            ..Self::IDENTITY
        }
    }

    /// Uniform scale followed by a translation.
    pub fn scale_translate(scale: f32, tx: f32, ty: f32) -> Self {
        Self {
            a: scale,
            d: scale,
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Compose: apply `self` first, then `next`.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            tx: next.a * self.tx + next.c * self.ty + next.tx,
            ty: next.b * self.tx + next.d * self.ty + next.ty,
        }
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` if the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.determinant();
        if det.abs() < EPSILON || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            tx: (self.c * self.ty - self.d * self.tx) * inv,
            ty: (self.b * self.tx - self.a * self.ty) * inv,
        })
    }

    pub fn map_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Bounding box of the four mapped corners.
    pub fn map_rect(&self, r: &RectF) -> RectF {
        let corners = [
            self.map_point(Point::new(r.left, r.top)),
            self.map_point(Point::new(r.right, r.top)),
            self.map_point(Point::new(r.left, r.bottom)),
            self.map_point(Point::new(r.right, r.bottom)),
        ];
        let mut out = RectF::new(f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for p in corners {
            out.left = out.left.min(p.x);
            out.top = out.top.min(p.y);
            out.right = out.right.max(p.x);
            out.bottom = out.bottom.max(p.y);
        }
        out
    }

    /// Horizontal scale factor (length of the mapped unit x vector).
    pub fn scale_x(&self) -> f32 {
        self.a.hypot(self.b)
    }

    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
            .iter()
            .all(|v| v.is_finite())
    }
}
