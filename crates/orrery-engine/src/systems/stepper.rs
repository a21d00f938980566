use crate::core::scene::BodyRegistry;

/// Advance every orbit, spin, moon and belt by `dt` simulated seconds,
/// scaled by the panel's speed multiplier. Allocation-free.
pub fn step_bodies(registry: &mut BodyRegistry, dt: f32, multiplier: f32, sun_rate: f32) {
    registry.spin_sun(sun_rate, dt, multiplier);
    let (planets, belts) = registry.split_mut();
    for body in planets.iter_mut() {
        body.step(dt, multiplier);
    }
    for belt in belts.iter_mut() {
        belt.step(dt, multiplier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::orbit::{Orbit, OrbitBody};
    use crate::config::SceneConfig;
    use crate::core::transform::LocalTransform;
    use crate::systems::effects::Rng;
    use glam::Vec3;
    use std::f32::consts::TAU;

    #[test]
    fn full_revolution_returns_to_start() {
        let mut reg = BodyRegistry::new(LocalTransform::default(), 1.0);
        reg.push_planet(OrbitBody::new("Terra", Orbit::new(6.0, 4.8, 0.01), 0.5));
        let start = reg.planet_world_position(0).unwrap();

        // One unit of angle step per frame, as tuned in the scene scripts.
        for _ in 0..628 {
            step_bodies(&mut reg, 1.0, 1.0, 0.0);
        }
        let phase = reg.planets()[0].orbit.phase;
        let unwrapped = if phase < 1.0 { phase + TAU } else { phase };
        assert!((unwrapped - 6.28).abs() < 1e-2, "phase = {phase}");

        let end = reg.planet_world_position(0).unwrap();
        assert!((end - start).length() < 2e-2, "{start} -> {end}");
    }

    #[test]
    fn multiplier_scales_every_body() {
        let config = SceneConfig::default();
        let mut slow = BodyRegistry::from_config(&config, &mut Rng::new(2));
        let mut fast = BodyRegistry::from_config(&config, &mut Rng::new(2));
        step_bodies(&mut slow, 0.5, 1.0, 0.1);
        step_bodies(&mut slow, 0.5, 1.0, 0.1);
        step_bodies(&mut fast, 0.5, 2.0, 0.1);

        for (a, b) in slow.planets().iter().zip(fast.planets()) {
            assert!((a.orbit.phase - b.orbit.phase).abs() < 1e-4, "{}", a.name);
            assert!((a.spin - b.spin).abs() < 1e-4);
        }
        assert!((slow.sun_spin() - fast.sun_spin()).abs() < 1e-6);
        assert!((slow.belts()[0].rotation_y - fast.belts()[0].rotation_y).abs() < 1e-6);
    }

    #[test]
    fn stepping_moves_planets_along_their_ellipse() {
        let mut reg = BodyRegistry::from_config(&SceneConfig::default(), &mut Rng::new(8));
        let before: Vec<Vec3> = (0..reg.len()).filter_map(|i| reg.planet_world_position(i)).collect();
        step_bodies(&mut reg, 1.0 / 60.0, 1.0, 0.0);
        for (i, p) in reg.planets().iter().enumerate() {
            let local = p.orbit.position();
            let on_ellipse = (local.x / p.orbit.a).powi(2) + (local.z / p.orbit.b).powi(2);
            assert!((on_ellipse - 1.0).abs() < 1e-4);
            assert_ne!(reg.planet_world_position(i), Some(before[i]));
        }
    }
}
