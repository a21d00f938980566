/// Render snapshot layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 27 floats]
/// [Camera: 8 floats]
/// [Bodies: max_bodies × 8 floats]
/// [Asteroids: max_asteroids × 8 floats]
/// [Explosions: max_explosions × 6 floats]
/// [Events: max_events × 4 floats]
/// [Media: max_media × 2 floats]
/// ```
///
/// Capacities are written into the header once at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::{GameEvent, MediaCommand};
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{AsteroidInstance, BodyInstance, ExplosionInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 27;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_ASTEROIDS: usize = 4;
pub const HEADER_ASTEROID_COUNT: usize = 5;
pub const HEADER_MAX_EXPLOSIONS: usize = 6;
pub const HEADER_EXPLOSION_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_MAX_MEDIA: usize = 10;
pub const HEADER_MEDIA_COUNT: usize = 11;
pub const HEADER_BUSY: usize = 12;
pub const HEADER_DOOR_ANGLE: usize = 13;
pub const HEADER_SHOW_ORBITS: usize = 14;
pub const HEADER_SHIP_MODE: usize = 15;
pub const HEADER_SHIP_X: usize = 16;
pub const HEADER_SHIP_Y: usize = 17;
pub const HEADER_SHIP_Z: usize = 18;
pub const HEADER_SHIP_YAW: usize = 19;
pub const HEADER_SUN_SPIN: usize = 20;
pub const HEADER_MUSIC_VOLUME: usize = 21;
pub const HEADER_BLOOM_STRENGTH: usize = 22;
pub const HEADER_AMBIENT_INTENSITY: usize = 23;
pub const HEADER_DIRECTIONAL_INTENSITY: usize = 24;
pub const HEADER_PLANET_LIGHT_INTENSITY: usize = 25;
pub const HEADER_SIMULATION_SPEED: usize = 26;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section (wire format, fixed).
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per body instance (wire format, fixed).
pub const BODY_FLOATS: usize = BodyInstance::FLOATS;

/// Floats per asteroid instance (wire format, fixed).
pub const ASTEROID_FLOATS: usize = AsteroidInstance::FLOATS;

/// Floats per explosion instance (wire format, fixed).
pub const EXPLOSION_FLOATS: usize = ExplosionInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Floats per media command: kind, panel (wire format, fixed).
pub const MEDIA_FLOATS: usize = MediaCommand::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_asteroids: usize,
    pub max_explosions: usize,
    pub max_events: usize,
    pub max_media: usize,

    pub body_data_floats: usize,
    pub asteroid_data_floats: usize,
    pub explosion_data_floats: usize,
    pub event_data_floats: usize,
    pub media_data_floats: usize,

    /// Offset (in floats) where the camera section begins.
    pub camera_offset: usize,
    pub body_data_offset: usize,
    pub asteroid_data_offset: usize,
    pub explosion_data_offset: usize,
    pub event_data_offset: usize,
    pub media_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_bodies: usize,
        max_asteroids: usize,
        max_explosions: usize,
        max_events: usize,
        max_media: usize,
    ) -> Self {
        let body_data_floats = max_bodies * BODY_FLOATS;
        let asteroid_data_floats = max_asteroids * ASTEROID_FLOATS;
        let explosion_data_floats = max_explosions * EXPLOSION_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;
        let media_data_floats = max_media * MEDIA_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let body_data_offset = camera_offset + CAMERA_FLOATS;
        let asteroid_data_offset = body_data_offset + body_data_floats;
        let explosion_data_offset = asteroid_data_offset + asteroid_data_floats;
        let event_data_offset = explosion_data_offset + explosion_data_floats;
        let media_data_offset = event_data_offset + event_data_floats;

        let buffer_total_floats = media_data_offset + media_data_floats;

        Self {
            max_bodies,
            max_asteroids,
            max_explosions,
            max_events,
            max_media,
            body_data_floats,
            asteroid_data_floats,
            explosion_data_floats,
            event_data_floats,
            media_data_floats,
            camera_offset,
            body_data_offset,
            asteroid_data_offset,
            explosion_data_offset,
            event_data_offset,
            media_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_bodies,
            config.max_asteroids,
            config.max_explosions,
            config.max_events,
            config.max_media,
        )
    }
}

/// The header section. Capacities and version are filled in once; the
/// per-frame fields are rewritten by the snapshot builder.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameHeader {
    values: [f32; HEADER_FLOATS],
}

impl FrameHeader {
    pub fn new(layout: &ProtocolLayout) -> Self {
        let mut values = [0.0; HEADER_FLOATS];
        values[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        values[HEADER_MAX_BODIES] = layout.max_bodies as f32;
        values[HEADER_MAX_ASTEROIDS] = layout.max_asteroids as f32;
        values[HEADER_MAX_EXPLOSIONS] = layout.max_explosions as f32;
        values[HEADER_MAX_EVENTS] = layout.max_events as f32;
        values[HEADER_MAX_MEDIA] = layout.max_media as f32;
        Self { values }
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.values.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);

        assert_eq!(layout.max_bodies, config.max_bodies);
        assert_eq!(layout.body_data_floats, config.max_bodies * 8);
        assert_eq!(layout.asteroid_data_floats, config.max_asteroids * 8);
        assert_eq!(layout.explosion_data_floats, config.max_explosions * 6);
        assert_eq!(layout.event_data_floats, config.max_events * 4);
        assert_eq!(layout.media_data_floats, config.max_media * 2);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(16, 1200, 32, 64, 8);
        let expected_total = HEADER_FLOATS + 8 + 16 * 8 + 1200 * 8 + 32 * 6 + 64 * 4 + 8 * 2;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 20, 30, 40, 50);

        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.body_data_offset, layout.camera_offset + CAMERA_FLOATS);
        assert_eq!(layout.asteroid_data_offset, layout.body_data_offset + layout.body_data_floats);
        assert_eq!(layout.explosion_data_offset, layout.asteroid_data_offset + layout.asteroid_data_floats);
        assert_eq!(layout.event_data_offset, layout.explosion_data_offset + layout.explosion_data_floats);
        assert_eq!(layout.media_data_offset, layout.event_data_offset + layout.event_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.media_data_offset + layout.media_data_floats);
    }

    #[test]
    fn header_carries_capacities_and_version() {
        let layout = ProtocolLayout::new(16, 1200, 32, 64, 8);
        let mut header = FrameHeader::new(&layout);
        assert_eq!(header.get(HEADER_PROTOCOL_VERSION), PROTOCOL_VERSION);
        assert_eq!(header.get(HEADER_MAX_ASTEROIDS), 1200.0);
        assert_eq!(header.get(HEADER_MAX_MEDIA), 8.0);

        header.set(HEADER_BUSY, 1.0);
        assert_eq!(header.as_slice()[HEADER_BUSY], 1.0);
        // Out-of-range writes are ignored.
        header.set(HEADER_FLOATS, 5.0);
        assert_eq!(header.get(HEADER_FLOATS), 0.0);
    }
}
