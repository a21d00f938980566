//! Transient visual effects: collision explosions.
//!
//! `EffectsState` owns the live explosions and the seeded RNG shared with
//! scene construction.

mod explosion;
mod rng;

pub use explosion::Explosion;
pub use rng::Rng;

use glam::Vec3;
use log::debug;

/// Container for all transient effects.
pub struct EffectsState {
    pub explosions: Vec<Explosion>,
    pub rng: Rng,
    /// Lifetime of a new explosion in milliseconds.
    pub explosion_ms: f32,
    /// Upper bound on simultaneous explosions; the oldest is dropped first.
    max_explosions: usize,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, 64)
    }

    pub fn with_capacity(seed: u64, max_explosions: usize) -> Self {
        EffectsState {
            explosions: Vec::with_capacity(max_explosions),
            rng: Rng::new(seed),
            explosion_ms: 1000.0,
            max_explosions: max_explosions.max(1),
        }
    }

    /// Fire-and-forget explosion for an asteroid of `asteroid_radius`.
    pub fn spawn_explosion(&mut self, position: Vec3, asteroid_radius: f32) {
        if self.explosions.len() >= self.max_explosions {
            debug!("explosion cap reached, dropping oldest");
            self.explosions.remove(0);
        }
        self.explosions
            .push(Explosion::new(position, asteroid_radius, self.explosion_ms));
    }

    /// Age every explosion to `now_ms` and remove the finished ones.
    pub fn tick(&mut self, now_ms: f64) {
        self.explosions.retain_mut(|e| e.tick(now_ms));
    }

    pub fn len(&self) -> usize {
        self.explosions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty()
    }

    pub fn clear(&mut self) {
        self.explosions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explosions_self_remove_after_lifetime() {
        let mut fx = EffectsState::new(1);
        fx.spawn_explosion(Vec3::ONE, 0.1);
        fx.tick(100.0);
        assert_eq!(fx.len(), 1);
        fx.spawn_explosion(Vec3::ZERO, 0.1);
        fx.tick(600.0);
        assert_eq!(fx.len(), 2);
        fx.tick(1_100.0);
        assert_eq!(fx.len(), 1, "first explosion should be gone");
        fx.tick(1_600.0);
        assert!(fx.is_empty());
    }

    #[test]
    fn cap_drops_oldest() {
        let mut fx = EffectsState::with_capacity(1, 2);
        fx.spawn_explosion(Vec3::X, 0.1);
        fx.spawn_explosion(Vec3::Y, 0.1);
        fx.spawn_explosion(Vec3::Z, 0.1);
        assert_eq!(fx.len(), 2);
        assert_eq!(fx.explosions[0].position, Vec3::Y);
    }
}
