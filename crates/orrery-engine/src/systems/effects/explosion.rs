use glam::Vec3;

/// Peak opacity of a fresh explosion.
const START_OPACITY: f32 = 0.8;

/// A growing, fading sphere left where an asteroid hit a planet.
/// Runs on wall-clock time; the first frame it is seen counts as its birth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub position: Vec3,
    /// Base diameter: twice the asteroid radius.
    pub size: f32,
    pub lifetime_ms: f32,
    born_ms: Option<f64>,
    /// Normalized age, updated each frame.
    t: f32,
}

impl Explosion {
    pub fn new(position: Vec3, asteroid_radius: f32, lifetime_ms: f32) -> Self {
        Self {
            position,
            size: asteroid_radius * 2.0,
            lifetime_ms,
            born_ms: None,
            t: 0.0,
        }
    }

    /// Update age from the frame timestamp. Returns false once expired.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let born = *self.born_ms.get_or_insert(now_ms);
        self.t = ((now_ms - born) as f32 / self.lifetime_ms).max(0.0);
        self.t < 1.0
    }

    pub fn progress(&self) -> f32 {
        self.t.min(1.0)
    }

    /// Uniform scale factor, 1 → 3 over the lifetime.
    pub fn scale(&self) -> f32 {
        1.0 + 2.0 * self.progress()
    }

    pub fn opacity(&self) -> f32 {
        (START_OPACITY * (1.0 - self.t)).max(0.0)
    }

    pub fn is_expired(&self) -> bool {
        self.t >= 1.0
    }
}
