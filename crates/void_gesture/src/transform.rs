//! Scale-then-rotate transform handed to the renderer

use glam::{Mat4, Quat, Vec3};

/// Object pose produced by the controller.
///
/// Scale is applied in object-local axes first, then the rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComposedTransform {
    pub scale: Vec3,
    pub rotation: Quat,
}

impl ComposedTransform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        scale: Vec3::ONE,
        rotation: Quat::IDENTITY,
    };

    /// Create a new transform
    #[inline]
    pub const fn new(scale: Vec3, rotation: Quat) -> Self {
        Self { scale, rotation }
    }

    /// Convert to a 4x4 matrix (`rotation * scale`)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, Vec3::ZERO)
    }

    /// Transform a point in object space
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (point * self.scale)
    }

    /// Rotation as axis and angle (radians).
    ///
    /// Derived from the quaternion on every call. Identity reports the +Y
    /// axis with a zero angle.
    pub fn axis_angle(&self) -> (Vec3, f32) {
        let q = if self.rotation.w < 0.0 { -self.rotation } else { self.rotation };
        let sin_half = q.xyz().length();
        if sin_half < 1e-6 {
            return (Vec3::Y, 0.0);
        }
        let angle = 2.0 * sin_half.atan2(q.w);
        (q.xyz() / sin_half, angle)
    }
}

impl Default for ComposedTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<ComposedTransform> for Mat4 {
    fn from(transform: ComposedTransform) -> Self {
        transform.to_matrix()
    }
}
