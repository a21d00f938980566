//! Asteroid-belt groups: particles sampled once from a torus, then only
//! tumbling in place while the whole group slowly turns.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use crate::config::BeltConfig;
use crate::core::transform::euler_xyz;
use crate::systems::effects::Rng;

/// One asteroid. Position and radius never change after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidParticle {
    /// Position in the belt group's local frame.
    pub position: Vec3,
    /// Accumulated tumble (Euler XYZ, radians).
    pub rotation: Vec3,
    /// Fixed per-axis tumble rate (radians per second).
    pub spin_velocity: Vec3,
    pub radius: f32,
}

/// A belt of asteroids sharing a toroidal spawn volume and a group rotation.
#[derive(Debug, Clone)]
pub struct BeltGroup {
    pub name: String,
    /// Fixed orientation of the group relative to the system root.
    pub tilt: Vec3,
    /// Accumulated rotation about the group's Y axis.
    pub rotation_y: f32,
    /// Radians per second about the group's Y axis.
    pub spin_rate: f32,
    pub asteroids: Vec<AsteroidParticle>,
}

impl BeltGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tilt: Vec3::ZERO,
            rotation_y: 0.0,
            spin_rate: 0.0,
            asteroids: Vec::new(),
        }
    }

    /// Sample `config.count` asteroids uniformly in angle, radius and height.
    pub fn generate(config: &BeltConfig, rng: &mut Rng) -> Self {
        let mut asteroids = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            let angle = rng.range(0.0, TAU);
            let radius = rng.range(config.inner_radius, config.outer_radius);
            let y = rng.centered(config.thickness * 0.5);
            let size = rng.range(config.min_size, config.max_size);
            let rotation = Vec3::new(rng.range(0.0, PI), rng.range(0.0, PI), rng.range(0.0, PI));
            let spin_velocity = Vec3::new(
                rng.centered(config.max_tumble),
                rng.centered(config.max_tumble),
                rng.centered(config.max_tumble),
            );
            asteroids.push(AsteroidParticle {
                position: Vec3::new(angle.cos() * radius, y, angle.sin() * radius),
                rotation,
                spin_velocity,
                radius: size,
            });
        }
        Self {
            name: config.name.clone(),
            tilt: config.tilt,
            rotation_y: 0.0,
            spin_rate: config.spin_rate,
            asteroids,
        }
    }

    /// Turn the group and tumble every asteroid.
    pub fn step(&mut self, dt: f32, multiplier: f32) {
        self.rotation_y += self.spin_rate * multiplier * dt;
        for asteroid in &mut self.asteroids {
            asteroid.rotation += asteroid.spin_velocity * multiplier * dt;
        }
    }

    /// Group transform relative to the system root.
    pub fn local_matrix(&self) -> Mat4 {
        euler_xyz(Vec3::new(self.tilt.x, self.tilt.y + self.rotation_y, self.tilt.z))
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }
}
