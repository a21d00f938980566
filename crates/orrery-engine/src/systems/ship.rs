use glam::{Mat4, Vec3};

use crate::components::ship::Ship;
use crate::config::ShipConfig;
use crate::core::scene::BodyRegistry;
use crate::input::queue::{keys, KeyState};
use crate::renderer::camera::Camera3D;

/// Result of one flight step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightOutcome {
    Moved,
    /// The move would have entered this planet's box; the ship stayed put.
    Blocked(usize),
}

/// One step of naive flight: yaw from A/D, thrust from W/S, lift from
/// Space/Shift, constant gravity, exponential damping, then an
/// axis-aligned box test against every planet. A blocked move zeroes the
/// velocity and keeps the previous position.
pub fn fly_ship(
    ship: &mut Ship,
    keys: &KeyState,
    config: &ShipConfig,
    registry: &BodyRegistry,
    dt: f32,
) -> FlightOutcome {
    ship.yaw += keys.axis(keys::A, keys::D) * config.turn_rate * dt;

    let accel = ship.forward() * keys.axis(keys::W, keys::S) * config.thrust
        + Vec3::Y * (keys.axis(keys::SPACE, keys::SHIFT) * config.lift - config.gravity);
    ship.velocity += accel * dt;
    ship.velocity *= config.damping.clamp(0.0, 1.0).powf(dt);

    let candidate = ship.position + ship.velocity * dt;
    let (min, max) = ship.bounds_at(candidate);
    if let Some(hit) = blocking_planet(registry, min, max) {
        ship.velocity = Vec3::ZERO;
        return FlightOutcome::Blocked(hit);
    }
    ship.position = candidate;
    FlightOutcome::Moved
}

/// Third-person chase camera: sit at `follow_offset` in the ship's frame
/// and look at the ship.
pub fn follow_ship(camera: &mut Camera3D, ship: &Ship, config: &ShipConfig, dt: f32) {
    let desired = Mat4::from_rotation_y(ship.yaw).transform_vector3(config.follow_offset) + ship.position;
    camera.follow(desired, ship.position, config.follow_smoothing, dt);
}

fn blocking_planet(registry: &BodyRegistry, min: Vec3, max: Vec3) -> Option<usize> {
    (0..registry.len()).find(|&i| {
        let radius = registry.planets()[i].radius;
        registry
            .planet_world_position(i)
            .is_some_and(|center| boxes_overlap(min, max, center - Vec3::splat(radius), center + Vec3::splat(radius)))
    })
}

#[inline]
fn boxes_overlap(a_min: Vec3, a_max: Vec3, b_min: Vec3, b_max: Vec3) -> bool {
    a_min.cmple(b_max).all() && b_min.cmple(a_max).all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::orbit::{Orbit, OrbitBody};
    use crate::config::{CameraConfig, Viewpoint};
    use crate::core::transform::LocalTransform;
    use crate::input::queue::InputEvent;

    const DT: f32 = 1.0 / 60.0;

    fn empty_space() -> BodyRegistry {
        BodyRegistry::new(LocalTransform::default(), 1.0)
    }

    fn weightless() -> ShipConfig {
        ShipConfig { gravity: 0.0, spawn: Vec3::ZERO, ..ShipConfig::default() }
    }

    fn held(codes: &[u32]) -> KeyState {
        let mut state = KeyState::new();
        for &key_code in codes {
            state.apply(&InputEvent::KeyDown { key_code });
        }
        state
    }

    #[test]
    fn gravity_pulls_down_when_idle() {
        let config = ShipConfig::default();
        let mut ship = Ship::new(&config);
        for _ in 0..30 {
            assert_eq!(fly_ship(&mut ship, &KeyState::new(), &config, &empty_space(), DT), FlightOutcome::Moved);
        }
        assert!(ship.position.y < config.spawn.y);
        assert!(ship.velocity.y < 0.0);
    }

    #[test]
    fn thrust_moves_along_heading() {
        let config = weightless();
        let mut ship = Ship::new(&config);
        let keys = held(&[keys::W]);
        for _ in 0..30 {
            fly_ship(&mut ship, &keys, &config, &empty_space(), DT);
        }
        assert!(ship.position.z < -0.1);
        assert!(ship.position.x.abs() < 1e-5);
        assert!(ship.position.y.abs() < 1e-5);
    }

    #[test]
    fn turning_changes_heading() {
        let config = weightless();
        let mut ship = Ship::new(&config);
        fly_ship(&mut ship, &held(&[keys::A]), &config, &empty_space(), 1.0);
        assert!((ship.yaw - config.turn_rate).abs() < 1e-6);
        fly_ship(&mut ship, &held(&[keys::D]), &config, &empty_space(), 1.0);
        assert!(ship.yaw.abs() < 1e-6);
    }

    #[test]
    fn planet_box_blocks_the_move() {
        let config = weightless();
        let mut reg = empty_space();
        // Planet box spans z in [-2, -1]; the ship's nose starts at z = -0.5.
        reg.push_planet(OrbitBody::new("Marte", Orbit::new(1.5, 1.5, 0.0).with_phase(-std::f32::consts::FRAC_PI_2), 0.5));
        let mut ship = Ship::new(&config);
        let keys = held(&[keys::W]);

        let mut blocked = None;
        for _ in 0..120 {
            if let FlightOutcome::Blocked(i) = fly_ship(&mut ship, &keys, &config, &reg, DT) {
                blocked = Some(i);
                break;
            }
        }
        assert_eq!(blocked, Some(0));
        assert_eq!(ship.velocity, Vec3::ZERO);
        let (min, _) = ship.bounds();
        assert!(min.z > -1.0, "ship entered the planet box: {min}");
    }

    #[test]
    fn camera_settles_behind_the_ship() {
        let config = ShipConfig { follow_smoothing: 0.0, ..ShipConfig::default() };
        let ship = Ship::new(&config);
        let mut camera = Camera3D::new(&CameraConfig::default(), Viewpoint::new(Vec3::ZERO, Vec3::NEG_Z));
        follow_ship(&mut camera, &ship, &config, DT);
        assert!((camera.position - (config.spawn + config.follow_offset)).length() < 1e-5);
        assert_eq!(camera.target, ship.position);
    }
}
