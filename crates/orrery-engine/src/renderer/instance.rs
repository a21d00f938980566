use bytemuck::{Pod, Zeroable};

/// Per-planet render data (planets, the sun and moons).
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Accumulated self-rotation in radians.
    pub spin: f32,
    /// Axial tilt in radians.
    pub tilt: f32,
    pub radius: f32,
    /// 1.0 when drawn, 0.0 when hidden.
    pub visible: f32,
    /// See the `BodyInstance::KIND_*` constants.
    pub kind: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_SUN: f32 = 0.0;
    pub const KIND_PLANET: f32 = 1.0;
    pub const KIND_RINGED_PLANET: f32 = 2.0;
    pub const KIND_MOON: f32 = 3.0;
}

/// Per-asteroid render data: world position, tumble, size, owning belt.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct AsteroidInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rx: f32,
    pub ry: f32,
    pub rz: f32,
    pub radius: f32,
    pub belt: f32,
}

impl AsteroidInstance {
    pub const FLOATS: usize = 8;
}

/// Per-explosion render data.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ExplosionInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Base diameter.
    pub size: f32,
    /// Growth factor applied to `size`.
    pub scale: f32,
    pub opacity: f32,
}

impl ExplosionInstance {
    pub const FLOATS: usize = 6;
}

/// Everything drawn this frame, rebuilt from scratch every tick.
pub struct RenderBuffer {
    pub bodies: Vec<BodyInstance>,
    pub asteroids: Vec<AsteroidInstance>,
    pub explosions: Vec<ExplosionInstance>,
    max_bodies: usize,
    max_asteroids: usize,
    max_explosions: usize,
}

impl RenderBuffer {
    pub fn with_capacity(max_bodies: usize, max_asteroids: usize, max_explosions: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(max_bodies),
            asteroids: Vec::with_capacity(max_asteroids),
            explosions: Vec::with_capacity(max_explosions),
            max_bodies,
            max_asteroids,
            max_explosions,
        }
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.asteroids.clear();
        self.explosions.clear();
    }

    /// Returns false once the body section is full.
    pub fn push_body(&mut self, instance: BodyInstance) -> bool {
        if self.bodies.len() >= self.max_bodies {
            return false;
        }
        self.bodies.push(instance);
        true
    }

    pub fn push_asteroid(&mut self, instance: AsteroidInstance) -> bool {
        if self.asteroids.len() >= self.max_asteroids {
            return false;
        }
        self.asteroids.push(instance);
        true
    }

    pub fn push_explosion(&mut self, instance: ExplosionInstance) -> bool {
        if self.explosions.len() >= self.max_explosions {
            return false;
        }
        self.explosions.push(instance);
        true
    }

    pub fn body_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    pub fn asteroid_count(&self) -> u32 {
        self.asteroids.len() as u32
    }

    pub fn explosion_count(&self) -> u32 {
        self.explosions.len() as u32
    }

    /// Raw pointers for the host's zero-copy reads.
    pub fn bodies_ptr(&self) -> *const f32 {
        self.bodies.as_ptr() as *const f32
    }

    pub fn asteroids_ptr(&self) -> *const f32 {
        self.asteroids.as_ptr() as *const f32
    }

    pub fn explosions_ptr(&self) -> *const f32 {
        self.explosions.as_ptr() as *const f32
    }
}
