//! Uniform scaling from 1D pointer travel

use glam::{Vec2, Vec3};

/// Accumulated uniform scale driven by pointer or hand travel.
///
/// Every `divisor` pixels of travel multiply the scale by `e`.
#[derive(Clone, Debug)]
pub struct Zoom {
    previous_point: Vec2,
    scale: Vec3,
    divisor: f32,
}

impl Zoom {
    /// Create a zoom engine at unit scale
    pub fn new(divisor: f32) -> Self {
        Self {
            previous_point: Vec2::ZERO,
            scale: Vec3::ONE,
            divisor,
        }
    }

    /// Start a zoom stroke at `point`
    pub fn begin(&mut self, point: Vec2) {
        self.previous_point = point;
    }

    /// Hand path: moving right-to-left grows the object.
    /// The stored point advances with every call.
    pub fn update_from_gesture(&mut self, point: Vec2) -> Vec3 {
        let factor = self.factor(self.previous_point.x - point.x);
        self.previous_point = point;
        self.apply(factor)
    }

    /// Pointer path: dragging down grows the object. Measured against the
    /// fixed `reference` point of the stroke, nothing is stored.
    pub fn update_from_pointer(&mut self, point: Vec2, reference: Vec2) -> Vec3 {
        let factor = self.factor(point.y - reference.y);
        self.apply(factor)
    }

    /// Current scale
    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Last point seen by the hand path
    #[inline]
    pub fn previous_point(&self) -> Vec2 {
        self.previous_point
    }

    /// Back to unit scale
    pub fn reset(&mut self) {
        self.previous_point = Vec2::ZERO;
        self.scale = Vec3::ONE;
    }

    #[inline]
    fn factor(&self, delta: f32) -> f32 {
        (delta / self.divisor).exp()
    }

    fn apply(&mut self, factor: f32) -> Vec3 {
        // Scale stays finite and positive
        let scaled = self.scale * factor;
        if scaled.is_finite() && scaled.min_element() > 0.0 {
            self.scale = scaled;
            log::trace!("Zoom factor {:.4}, scale {:?}", factor, self.scale);
        }
        self.scale
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gesture_right_to_left_by_divisor_scales_by_e() {
        let mut zoom = Zoom::default();
        zoom.begin(Vec2::new(400.0, 200.0));
        let scale = zoom.update_from_gesture(Vec2::new(300.0, 200.0));
        assert_relative_eq!(scale.x, std::f32::consts::E, max_relative = 1e-5);
        assert_eq!(scale.x, scale.y);
        assert_eq!(scale.y, scale.z);
        assert_eq!(zoom.previous_point(), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_gesture_monotonicity() {
        let mut zoom = Zoom::default();
        zoom.begin(Vec2::new(500.0, 0.0));
        let mut last = zoom.scale().x;
        for x in [480.0, 450.0, 400.0, 399.0] {
            let s = zoom.update_from_gesture(Vec2::new(x, 0.0));
            assert!(s.x > last);
            last = s.x;
        }
        for x in [420.0, 500.0, 501.0] {
            let s = zoom.update_from_gesture(Vec2::new(x, 0.0));
            assert!(s.x < last);
            last = s.x;
        }
    }

    #[test]
    fn test_pointer_is_relative_to_reference() {
        let mut zoom = Zoom::default();
        let reference = Vec2::new(100.0, 100.0);
        zoom.begin(reference);

        let first = zoom.update_from_pointer(Vec2::new(100.0, 150.0), reference);
        assert_relative_eq!(first.x, 0.5f32.exp(), max_relative = 1e-5);

        // Same point again compounds, since the reference does not move
        let second = zoom.update_from_pointer(Vec2::new(100.0, 150.0), reference);
        assert_relative_eq!(second.x, 1.0f32.exp(), max_relative = 1e-5);
        assert_eq!(zoom.previous_point(), reference);
    }

    #[test]
    fn test_pointer_drag_up_shrinks() {
        let mut zoom = Zoom::default();
        let reference = Vec2::new(0.0, 300.0);
        let scale = zoom.update_from_pointer(Vec2::new(0.0, 200.0), reference);
        assert!(scale.x < 1.0);
    }

    #[test]
    fn test_reset() {
        let mut zoom = Zoom::default();
        zoom.begin(Vec2::new(300.0, 0.0));
        zoom.update_from_gesture(Vec2::new(100.0, 0.0));
        zoom.reset();
        assert_eq!(zoom.scale(), Vec3::ONE);
    }
}
