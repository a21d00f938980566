use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::config::{CameraConfig, Viewpoint};

/// A half-line in world space. `direction` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Perspective camera with an explicit look-at point, mirrored from the host
/// renderer's camera and orbit-controls target.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// Camera state as written into the render snapshot.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct CameraUniform {
    pub position: [f32; 3],
    pub fov_deg: f32,
    pub target: [f32; 3],
    pub aspect: f32,
}

impl CameraUniform {
    pub const FLOATS: usize = 8;
}

impl Camera3D {
    pub fn new(config: &CameraConfig, view: Viewpoint) -> Self {
        Self {
            position: view.position,
            target: view.look_at,
            fov_deg: config.fov_deg,
            aspect: 16.0 / 9.0,
            near: config.near,
            far: config.far,
        }
    }

    pub fn view(&self) -> Viewpoint {
        Viewpoint::new(self.position, self.target)
    }

    pub fn set_view(&mut self, view: Viewpoint) {
        self.position = view.position;
        self.target = view.look_at;
    }

    /// Resize the viewport. Non-positive or non-finite ratios are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// OpenGL-style projection (clip z in [-1, 1]) like the host renderer.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    /// Ray from the camera through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }

    /// Project a world point to normalized device coordinates.
    pub fn world_to_ndc(&self, point: Vec3) -> Vec3 {
        (self.projection_matrix() * self.view_matrix()).project_point3(point)
    }

    /// Ease toward a desired pose. `smoothing` 0 snaps; values towards 1
    /// lag further behind. Frame-rate independent.
    pub fn follow(&mut self, position: Vec3, target: Vec3, smoothing: f32, dt: f32) {
        let smoothing = smoothing.clamp(0.0, 0.99);
        if smoothing <= 0.0 {
            self.position = position;
            self.target = target;
        } else {
            let lerp_factor = 1.0 - smoothing.powf(dt * 60.0);
            self.position += (position - self.position) * lerp_factor;
            self.target += (target - self.target) * lerp_factor;
        }
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            position: self.position.to_array(),
            fov_deg: self.fov_deg,
            target: self.target.to_array(),
            aspect: self.aspect,
        }
    }
}
