//! Clickable things in the scene and their hit volumes.

use glam::Vec3;
use log::debug;

use crate::config::{DOOR_MESH, DOOR_PIVOT};
use crate::renderer::camera::Ray;

/// What a click on a target should do. Attached once, when the target is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Door,
    /// Index into the configured panels.
    VideoPanel(usize),
    /// Index into the body registry's planets.
    Planet(usize),
}

impl TargetKind {
    /// Classify a scene-node name. Door names and configured panel names are
    /// recognised; every other name is treated as a planet at `planet_index`.
    pub fn from_name<S: AsRef<str>>(name: &str, panels: &[S], planet_index: usize) -> Self {
        if name == DOOR_MESH || name == DOOR_PIVOT {
            return TargetKind::Door;
        }
        if let Some(i) = panels.iter().position(|p| p.as_ref() == name) {
            return TargetKind::VideoPanel(i);
        }
        debug!("target `{name}` treated as planet #{planet_index}");
        TargetKind::Planet(planet_index)
    }
}

/// A ray-testable shape in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitVolume {
    Sphere { center: Vec3, radius: f32 },
    Aabb { min: Vec3, max: Vec3 },
}

impl HitVolume {
    /// Distance along the ray to the first hit, if any. Hits behind the ray
    /// origin do not count.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            HitVolume::Sphere { center, radius } => ray_sphere(ray, center, radius),
            HitVolume::Aabb { min, max } => ray_aabb(ray, min, max),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveTarget {
    pub name: String,
    pub kind: TargetKind,
}

impl InteractiveTarget {
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        Self { name: name.into(), kind }
    }
}

fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let near = -b - sq;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sq;
    (far >= 0.0).then_some(far)
}

fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = ray.direction.recip();
    let t0 = (min - ray.origin) * inv;
    let t1 = (max - ray.origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_near > t_far || t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}
