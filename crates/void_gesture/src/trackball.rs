//! Arcball rotation from 2D pointer motion
//!
//! Points are projected onto a unit hemisphere facing the viewer. The arc
//! between two successive projections becomes an incremental rotation that
//! is composed into the accumulated orientation.

use glam::{Quat, Vec2, Vec3};

/// Render surface size in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a new viewport
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A viewport with a zero, negative or non-finite side cannot be projected onto
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Center of the viewport in pixel coordinates
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(640.0, 480.0)
    }
}

impl From<[f32; 2]> for Viewport {
    fn from([width, height]: [f32; 2]) -> Self {
        Self::new(width, height)
    }
}

/// Project a pixel position onto the unit hemisphere.
///
/// The viewport center maps to (0, 0, 1). Points on or outside the inscribed
/// circle land on the equator (z = 0); x and y are clamped to [-1, 1] so the
/// result stays bounded for points far outside the viewport.
pub fn project_to_sphere(viewport: Viewport, point: Vec2) -> Vec3 {
    if viewport.is_degenerate() {
        return Vec3::Z;
    }

    let x = (point.x / (viewport.width * 0.5) - 1.0).clamp(-1.0, 1.0);
    let y = (1.0 - point.y / (viewport.height * 0.5)).clamp(-1.0, 1.0);

    let z2 = 1.0 - x * x - y * y;
    let z = if z2 > 0.0 { z2.sqrt() } else { 0.0 };

    Vec3::new(x, y, z)
}

/// Accumulated arcball orientation
#[derive(Clone, Debug)]
pub struct Trackball {
    previous_projection: Vec3,
    orientation: Quat,
    sensitivity: f32,
}

impl Trackball {
    /// Create a trackball with the given angle multiplier
    pub fn new(sensitivity: f32) -> Self {
        Self {
            previous_projection: Vec3::Z,
            orientation: Quat::IDENTITY,
            sensitivity,
        }
    }

    /// Start a stroke at `point`. The orientation is left untouched.
    pub fn begin_stroke(&mut self, point: Vec2, viewport: Viewport) {
        self.previous_projection = project_to_sphere(viewport, point);
    }

    /// Continue the current stroke to `point` and return the new orientation.
    ///
    /// The delta is right-multiplied, so it rotates about an axis expressed
    /// in the object's already-rotated frame.
    pub fn update_stroke(&mut self, point: Vec2, viewport: Viewport) -> Quat {
        let current = project_to_sphere(viewport, point);
        if current == self.previous_projection {
            return self.orientation;
        }

        let delta = arc_rotation(self.previous_projection, current, self.sensitivity);
        self.orientation = (self.orientation * delta).normalize();
        self.previous_projection = current;

        log::trace!(
            "Trackball step to {:?}, orientation {:?}",
            current,
            self.orientation
        );

        self.orientation
    }

    /// Current accumulated orientation
    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Last projection the next update will be measured from
    #[inline]
    pub fn previous_projection(&self) -> Vec3 {
        self.previous_projection
    }

    /// Angle multiplier
    #[inline]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Back to identity orientation with the projection at the pole
    pub fn reset(&mut self) {
        self.previous_projection = Vec3::Z;
        self.orientation = Quat::IDENTITY;
    }
}

impl Default for Trackball {
    fn default() -> Self {
        Self::new(1.5)
    }
}

/// Rotation carrying `from` onto `to`, with its angle scaled by `sensitivity`.
/// Collinear inputs have no defined axis and give the identity.
fn arc_rotation(from: Vec3, to: Vec3, sensitivity: f32) -> Quat {
    let Some(axis) = from.cross(to).try_normalize() else {
        return Quat::IDENTITY;
    };
    let angle = from.angle_between(to) * sensitivity;
    Quat::from_axis_angle(axis, angle)
}
