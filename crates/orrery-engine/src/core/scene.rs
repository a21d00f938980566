use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::components::belt::{AsteroidParticle, BeltGroup};
use crate::components::orbit::{MoonOrbit, Orbit, OrbitBody};
use crate::config::SceneConfig;
use crate::core::transform::LocalTransform;
use crate::systems::effects::Rng;

/// Flat storage for everything that orbits or tumbles under the system root.
/// Small fixed counts (eight planets, two belts), so plain Vecs and linear
/// name lookups.
pub struct BodyRegistry {
    root: LocalTransform,
    root_matrix: Mat4,
    planets: Vec<OrbitBody>,
    belts: Vec<BeltGroup>,
    sun_radius: f32,
    /// Accumulated sun self-rotation.
    sun_spin: f32,
}

impl BodyRegistry {
    pub fn new(root: LocalTransform, sun_radius: f32) -> Self {
        Self {
            root,
            root_matrix: root.matrix(),
            planets: Vec::with_capacity(8),
            belts: Vec::with_capacity(2),
            sun_radius,
            sun_spin: 0.0,
        }
    }

    /// Build the solar system described by `config`. Initial orbit phases
    /// and belt particles come from `rng`.
    pub fn from_config(config: &SceneConfig, rng: &mut Rng) -> Self {
        let root = LocalTransform::new()
            .with_offset(config.system_origin)
            .with_rotation(config.system_tilt);
        let mut registry = Self::new(root, config.sun_radius);

        for p in &config.planets {
            let orbit = Orbit::new(p.distance, p.distance * config.minor_axis_ratio, p.revolution_speed)
                .with_phase(rng.range(0.0, TAU));
            let mut body = OrbitBody::new(p.name.clone(), orbit, p.radius)
                .with_spin(p.rotation_speed)
                .with_tilt(p.tilt_deg.to_radians())
                .with_ring(p.ring);
            if let Some(m) = &p.moon {
                body = body.with_moon(MoonOrbit::new(m.orbit_radius, m.body_radius, m.speed));
            }
            registry.push_planet(body);
        }
        for b in &config.belts {
            registry.push_belt(BeltGroup::generate(b, rng));
        }
        registry
    }

    pub fn push_planet(&mut self, body: OrbitBody) {
        self.planets.push(body);
    }

    pub fn push_belt(&mut self, belt: BeltGroup) {
        self.belts.push(belt);
    }

    pub fn root(&self) -> &LocalTransform {
        &self.root
    }

    pub fn root_matrix(&self) -> Mat4 {
        self.root_matrix
    }

    pub fn planets(&self) -> &[OrbitBody] {
        &self.planets
    }

    pub fn planets_mut(&mut self) -> &mut [OrbitBody] {
        &mut self.planets
    }

    pub fn belts(&self) -> &[BeltGroup] {
        &self.belts
    }

    pub fn belts_mut(&mut self) -> &mut [BeltGroup] {
        &mut self.belts
    }

    /// Planets and belts, mutably, at the same time.
    pub fn split_mut(&mut self) -> (&mut [OrbitBody], &mut [BeltGroup]) {
        (&mut self.planets, &mut self.belts)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.planets.iter().position(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&OrbitBody> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut OrbitBody> {
        self.planets.iter_mut().find(|p| p.name == name)
    }

    /// Show or hide a planet. Returns false if no planet has that name.
    pub fn set_visible(&mut self, name: &str, visible: bool) -> bool {
        match self.get_mut(name) {
            Some(body) => {
                body.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn sun_radius(&self) -> f32 {
        self.sun_radius
    }

    pub fn sun_spin(&self) -> f32 {
        self.sun_spin
    }

    pub fn spin_sun(&mut self, rate: f32, dt: f32, multiplier: f32) {
        self.sun_spin += rate * multiplier * dt;
    }

    pub fn sun_world_position(&self) -> Vec3 {
        self.root_matrix.transform_point3(Vec3::ZERO)
    }

    pub fn planet_world_matrix(&self, index: usize) -> Option<Mat4> {
        self.planets.get(index).map(|p| self.root_matrix * p.local_matrix())
    }

    pub fn planet_world_position(&self, index: usize) -> Option<Vec3> {
        self.planets
            .get(index)
            .map(|p| self.root_matrix.transform_point3(p.orbit.position()))
    }

    pub fn moon_world_position(&self, index: usize) -> Option<Vec3> {
        self.planets
            .get(index)
            .and_then(|p| p.moon_local_position())
            .map(|local| self.root_matrix.transform_point3(local))
    }

    pub fn belt_world_matrix(&self, index: usize) -> Option<Mat4> {
        self.belts.get(index).map(|b| self.root_matrix * b.local_matrix())
    }

    /// World position of one asteroid given its belt's world matrix.
    #[inline]
    pub fn asteroid_world_position(belt_world: &Mat4, asteroid: &AsteroidParticle) -> Vec3 {
        belt_world.transform_point3(asteroid.position)
    }

    pub fn asteroid_count(&self) -> usize {
        self.belts.iter().map(|b| b.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new(LocalTransform::default(), 1.0)
    }
}
