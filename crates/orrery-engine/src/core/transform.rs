// core/transform.rs
//
// Local transforms for the scene-graph nodes the kernel mirrors
// (system root, planet meshes, belt groups, door pivot).
// Rotations compose in Euler XYZ order, R = Rx · Ry · Rz, matching the host renderer.

use glam::{Mat4, Vec3};

/// Position, Euler rotation and scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent.
    pub offset: Vec3,
    /// Euler angles (radians) applied as X, then Y, then Z.
    pub rotation: Vec3,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation part only.
    pub fn rotation_matrix(&self) -> Mat4 {
        euler_xyz(self.rotation)
    }

    /// Full local matrix: translate · rotate · scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.offset) * euler_xyz(self.rotation) * Mat4::from_scale(self.scale)
    }
}

/// Rotation matrix for Euler angles in XYZ order.
#[inline]
pub fn euler_xyz(angles: Vec3) -> Mat4 {
    Mat4::from_rotation_x(angles.x) * Mat4::from_rotation_y(angles.y) * Mat4::from_rotation_z(angles.z)
}
