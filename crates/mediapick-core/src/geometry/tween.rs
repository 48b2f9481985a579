//! Time-driven interpolation between two values.
//!
//! Nothing here owns a clock: the host calls [`Animated::advance`] from
//! whatever frame callback or timer it has, passing the elapsed time.

use std::time::Duration;

use super::affine::Affine;
use super::rect::RectF;

/// Linear interpolation between two values of the same type.
pub trait Lerp: Copy {
    fn lerp(&self, to: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for RectF {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        RectF::new(
            self.left.lerp(&to.left, t),
            self.top.lerp(&to.top, t),
            self.right.lerp(&to.right, t),
            self.bottom.lerp(&to.bottom, t),
        )
    }
}

impl Lerp for Affine {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        Affine {
            a: self.a.lerp(&to.a, t),
            b: self.b.lerp(&to.b, t),
            c: self.c.lerp(&to.c, t),
            d: self.d.lerp(&to.d, t),
            tx: self.tx.lerp(&to.tx, t),
            ty: self.ty.lerp(&to.ty, t),
        }
    }
}

/// Accelerate-decelerate curve on `[0, 1]`.
fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// A single interpolation from `start` to `end`.
#[derive(Clone, Debug)]
pub struct Tween<T> {
    pub start: T,
    pub end: T,
    pub elapsed: Duration,
    pub duration: Duration,
}

impl<T: Lerp> Tween<T> {
    pub fn new(start: T, end: T, duration: Duration) -> Self {
        Self {
            start,
            end,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.end;
        }
        self.start.lerp(&self.end, ease_in_out(self.progress()))
    }

    pub fn advance(&mut self, dt: Duration) -> T {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }
}

/// A value with an optional in-flight tween towards a target.
///
/// Starting a new animation replaces any running one, starting from the
/// value currently displayed.
#[derive(Clone, Debug)]
pub struct Animated<T> {
    current: T,
    tween: Option<Tween<T>>,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            tween: None,
        }
    }

    /// Value as currently displayed.
    pub fn get(&self) -> T {
        self.current
    }

    /// Value once any running animation completes.
    pub fn resting(&self) -> T {
        self.tween.as_ref().map_or(self.current, |t| t.end)
    }

    /// Jump to `value`, dropping any running animation.
    pub fn set(&mut self, value: T) {
        self.current = value;
        self.tween = None;
    }

    /// Mutate the displayed value in place, dropping any running animation.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        self.tween = None;
        f(&mut self.current);
    }

    pub fn animate_to(&mut self, target: T, duration: Duration) {
        if duration.is_zero() {
            self.set(target);
            return;
        }
        self.tween = Some(Tween::new(self.current, target, duration));
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Step the running animation. Returns true while still animating.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        self.current = tween.advance(dt);
        if tween.is_finished() {
            self.tween = None;
        }
        self.tween.is_some()
    }

    /// Complete any running animation immediately.
    pub fn finish(&mut self) {
        if let Some(tween) = self.tween.take() {
            self.current = tween.end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_end_exactly() {
        let mut t = Tween::new(0.0f32, 10.0, Duration::from_millis(300));
        t.advance(Duration::from_millis(100));
        let mid = t.value();
        assert!(mid > 0.0 && mid < 10.0);
        assert_eq!(t.advance(Duration::from_millis(500)), 10.0);
        assert!(t.is_finished());
    }

    #[test]
    fn test_animated_new_target_overrides_running() {
        let mut a = Animated::new(RectF::new(0.0, 0.0, 10.0, 10.0));
        a.animate_to(RectF::new(0.0, 0.0, 20.0, 20.0), Duration::from_millis(300));
        a.advance(Duration::from_millis(150));
        let shown = a.get();
        a.animate_to(RectF::new(0.0, 0.0, 5.0, 5.0), Duration::from_millis(300));
        // restarts from what was displayed
        assert_eq!(a.get(), shown);
        assert_eq!(a.resting(), RectF::new(0.0, 0.0, 5.0, 5.0));
        while a.advance(Duration::from_millis(16)) {}
        assert_eq!(a.get(), RectF::new(0.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut a = Animated::new(1.0f32);
        a.animate_to(4.0, Duration::ZERO);
        assert!(!a.is_animating());
        assert_eq!(a.get(), 4.0);
    }
}
