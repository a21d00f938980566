use glam::{Mat4, Vec3};

use crate::config::ShipConfig;

/// The toggle-able flying ship. Inactive ships keep their last pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub active: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Heading about world Y. Zero faces -Z.
    pub yaw: f32,
    pub half_extents: Vec3,
}

impl Ship {
    pub fn new(config: &ShipConfig) -> Self {
        Self {
            active: false,
            position: config.spawn,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            half_extents: config.half_extents,
        }
    }

    /// Put the ship back at its spawn point, at rest.
    pub fn respawn(&mut self, config: &ShipConfig) {
        self.position = config.spawn;
        self.velocity = Vec3::ZERO;
        self.yaw = 0.0;
    }

    /// Unit vector the nose points along, in the XZ plane.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Bounds of the ship if it were at `position`.
    pub fn bounds_at(&self, position: Vec3) -> (Vec3, Vec3) {
        (position - self.half_extents, position + self.half_extents)
    }

    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.bounds_at(self.position)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_yaw_faces_negative_z() {
        let ship = Ship::new(&ShipConfig::default());
        assert!((ship.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn forward_matches_matrix() {
        let mut ship = Ship::new(&ShipConfig::default());
        ship.yaw = 0.7;
        let nose = ship.matrix().transform_vector3(Vec3::NEG_Z);
        assert!((nose - ship.forward()).length() < 1e-5);
    }

    #[test]
    fn respawn_resets_motion() {
        let config = ShipConfig::default();
        let mut ship = Ship::new(&config);
        ship.position = Vec3::ONE;
        ship.velocity = Vec3::X;
        ship.yaw = 1.0;
        ship.respawn(&config);
        assert_eq!(ship.position, config.spawn);
        assert_eq!(ship.velocity, Vec3::ZERO);
        assert_eq!(ship.yaw, 0.0);
    }
}
