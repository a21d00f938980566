//! Elliptical orbit model for planets and their moons.
//!
//! Position is a pure function of the phase angle: `(a·cos θ, 0, b·sin θ)`.
//! Phase and spin are the only accumulated state, and only the simulation
//! stepper advances them.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::core::transform::euler_xyz;

/// Ellipse in the XZ plane of the system root, centred on the sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Semi-major axis (along X).
    pub a: f32,
    /// Semi-minor axis (along Z).
    pub b: f32,
    /// Current phase angle in radians, kept in `[0, 2π)`.
    pub phase: f32,
    /// Radians of phase per simulated second at multiplier 1.
    pub speed: f32,
}

impl Orbit {
    pub fn new(a: f32, b: f32, speed: f32) -> Self {
        Self { a, b, phase: 0.0, speed }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase.rem_euclid(TAU);
        self
    }

    /// Point on the ellipse at an arbitrary phase angle.
    #[inline]
    pub fn position_at(&self, theta: f32) -> Vec3 {
        Vec3::new(self.a * theta.cos(), 0.0, self.b * theta.sin())
    }

    /// Point on the ellipse at the current phase.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position_at(self.phase)
    }

    /// Advance the phase by `speed · multiplier · dt`, wrapping modulo 2π.
    #[inline]
    pub fn advance(&mut self, dt: f32, multiplier: f32) {
        self.phase = (self.phase + self.speed * multiplier * dt).rem_euclid(TAU);
    }
}

/// A moon circling its planet in the planet's own (spinning, tilted) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonOrbit {
    /// Distance from the planet centre.
    pub radius: f32,
    /// Radius of the moon body itself.
    pub body_radius: f32,
    /// Current phase angle in radians, kept in `[0, 2π)`.
    pub phase: f32,
    /// Radians of phase per simulated second at multiplier 1.
    pub speed: f32,
}

impl MoonOrbit {
    pub fn new(radius: f32, body_radius: f32, speed: f32) -> Self {
        Self { radius, body_radius, phase: 0.0, speed }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32, multiplier: f32) {
        self.phase = (self.phase + self.speed * multiplier * dt).rem_euclid(TAU);
    }

    /// Position relative to the planet centre, before the planet's rotation.
    #[inline]
    pub fn local_position(&self) -> Vec3 {
        Mat4::from_rotation_y(self.phase).transform_point3(Vec3::new(self.radius, 0.0, 0.0))
    }
}

/// A planet: an orbit, a spinning tilted body, and an optional moon.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitBody {
    /// Stable, unique name ("Terra", "Marte", ...).
    pub name: String,
    pub orbit: Orbit,
    /// Body radius, used for rendering, hit-testing and collision.
    pub radius: f32,
    /// Accumulated self-rotation about the body's Y axis. Not wrapped.
    pub spin: f32,
    /// Radians of spin per simulated second at multiplier 1.
    pub spin_speed: f32,
    /// Axial tilt in radians, applied about Z.
    pub tilt: f32,
    pub moon: Option<MoonOrbit>,
    /// Whether the body carries a ring (render hint only).
    pub ring: bool,
    /// False once its texture failed to load. Hidden bodies keep orbiting.
    pub visible: bool,
}

impl OrbitBody {
    pub fn new(name: impl Into<String>, orbit: Orbit, radius: f32) -> Self {
        Self {
            name: name.into(),
            orbit,
            radius,
            spin: 0.0,
            spin_speed: 0.0,
            tilt: 0.0,
            moon: None,
            ring: false,
            visible: true,
        }
    }

    pub fn with_spin(mut self, spin_speed: f32) -> Self {
        self.spin_speed = spin_speed;
        self
    }

    pub fn with_tilt(mut self, tilt: f32) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_moon(mut self, moon: MoonOrbit) -> Self {
        self.moon = Some(moon);
        self
    }

    pub fn with_ring(mut self, ring: bool) -> Self {
        self.ring = ring;
        self
    }

    /// Advance orbit, spin and moon by one step. Never allocates.
    pub fn step(&mut self, dt: f32, multiplier: f32) {
        self.orbit.advance(dt, multiplier);
        self.spin += self.spin_speed * multiplier * dt;
        if let Some(moon) = &mut self.moon {
            moon.advance(dt, multiplier);
        }
    }

    /// Transform of the planet mesh relative to the system root.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.orbit.position()) * euler_xyz(Vec3::new(0.0, self.spin, self.tilt))
    }

    /// Moon position relative to the system root, if the body has a moon.
    pub fn moon_local_position(&self) -> Option<Vec3> {
        self.moon
            .as_ref()
            .map(|moon| self.local_matrix().transform_point3(moon.local_position()))
    }
}
