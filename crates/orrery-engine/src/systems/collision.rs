use glam::Vec3;
use log::debug;

use crate::api::types::GameEvent;
use crate::core::scene::BodyRegistry;
use crate::systems::effects::EffectsState;

/// Removes asteroids that overlap a planet. Keeps the planet list between
/// calls so the fixed step does not allocate.
#[derive(Debug, Default)]
pub struct CollisionPruner {
    colliders: Vec<(Vec3, f32)>,
}

impl CollisionPruner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every asteroid that overlaps a planet (centre distance below
    /// the sum of radii), spawning an explosion where it was. Returns how
    /// many were removed. Hidden planets still collide.
    ///
    /// This is a brute-force asteroids × planets scan; it dominates the frame
    /// cost and would need spatial partitioning for much larger belts.
    pub fn prune(
        &mut self,
        registry: &mut BodyRegistry,
        effects: &mut EffectsState,
        events: &mut Vec<GameEvent>,
    ) -> usize {
        self.colliders.clear();
        self.colliders.extend((0..registry.len()).filter_map(|i| {
            let radius = registry.planets()[i].radius;
            registry.planet_world_position(i).map(|p| (p, radius))
        }));
        prune_against(&self.colliders, registry, effects, events)
    }
}

fn prune_against(
    planets: &[(Vec3, f32)],
    registry: &mut BodyRegistry,
    effects: &mut EffectsState,
    events: &mut Vec<GameEvent>,
) -> usize {
    if planets.is_empty() {
        return 0;
    }

    let mut removed_total = 0;
    for belt_index in 0..registry.belts().len() {
        let Some(belt_world) = registry.belt_world_matrix(belt_index) else {
            continue;
        };
        let belt = &mut registry.belts_mut()[belt_index];
        let before = belt.asteroids.len();
        belt.asteroids.retain(|asteroid| {
            let world = BodyRegistry::asteroid_world_position(&belt_world, asteroid);
            let hit = planets
                .iter()
                .any(|&(center, radius)| world.distance(center) < radius + asteroid.radius);
            if hit {
                effects.spawn_explosion(world, asteroid.radius);
            }
            !hit
        });

        let remaining = belt.asteroids.len();
        for _ in remaining..before {
            events.push(GameEvent::new(
                GameEvent::ASTEROID_DESTROYED,
                belt_index as f32,
                remaining as f32,
                0.0,
            ));
        }
        if remaining < before {
            debug!("belt `{}`: {} asteroid(s) destroyed, {} left", belt.name, before - remaining, remaining);
        }
        removed_total += before - remaining;
    }
    removed_total
}
