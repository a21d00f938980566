use log::{debug, warn};

use crate::api::types::{GameEvent, MediaCommand};
use crate::assets::registry::AssetTracker;
use crate::components::door::Door;
use crate::components::ship::Ship;
use crate::config::{CameraConfig, DebugParams, DoorConfig, SceneConfig, ShipConfig};
use crate::core::scene::BodyRegistry;
use crate::error::{AssetError, ConfigError};
use crate::extensions::transition::{CameraTransition, TransitionEffect, TransitionEngine};
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::systems::effects::EffectsState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum body instances in the snapshot: sun, planets, moons (default: 32).
    pub max_bodies: usize,
    /// Maximum asteroid instances (default: 2048).
    pub max_asteroids: usize,
    /// Maximum live explosions (default: 64).
    pub max_explosions: usize,
    /// Maximum game events per frame (default: 64).
    pub max_events: usize,
    /// Maximum media commands per frame (default: 16).
    pub max_media: usize,
    /// Seed for orbit phases and belt sampling.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_bodies: 32,
            max_asteroids: 2048,
            max_explosions: 64,
            max_events: 64,
            max_media: 16,
            seed: 42,
        }
    }
}

/// The contract the top-level scene controller fulfils.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the scene. A configuration error here is fatal.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), ConfigError>;

    /// Consume this frame's clicks, keys and panel commands.
    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// One fixed simulation step of `dt` seconds.
    fn fixed_update(&mut self, ctx: &mut EngineContext, dt: f32);

    /// Once per rendered frame, after transitions have been applied.
    fn frame(&mut self, _ctx: &mut EngineContext, _frame_dt: f32) {}

    /// The host finished loading an asset.
    fn asset_loaded(&mut self, _ctx: &mut EngineContext, _name: &str) {}

    /// The host failed to load an asset. Never fatal.
    fn asset_failed(&mut self, _ctx: &mut EngineContext, error: AssetError) {
        warn!("{error}");
    }

    /// The browser refused to start playback (autoplay policy).
    fn media_blocked(&mut self, _ctx: &mut EngineContext, error: AssetError) {
        warn!("{error}");
    }
}

/// A media command waiting for its wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingMedia {
    due_ms: f64,
    command: MediaCommand,
}

/// Mutable simulation state, passed to every `Game` hook. Owned by the
/// runner and touched only from the frame callback.
pub struct EngineContext {
    pub registry: BodyRegistry,
    pub camera: Camera3D,
    pub transitions: TransitionEngine,
    pub door: Door,
    pub ship: Ship,
    pub effects: EffectsState,
    pub params: DebugParams,
    pub assets: AssetTracker,
    pub events: Vec<GameEvent>,
    pub media: Vec<MediaCommand>,
    pending_media: Vec<PendingMedia>,
    now_ms: f64,
    max_events: usize,
    max_media: usize,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        let scene = SceneConfig::default();
        Self {
            registry: BodyRegistry::default(),
            camera: Camera3D::new(&CameraConfig::default(), scene.corridor),
            transitions: TransitionEngine::new(),
            door: Door::new(&DoorConfig::default()),
            ship: Ship::new(&ShipConfig::default()),
            effects: EffectsState::with_capacity(config.seed, config.max_explosions),
            params: DebugParams::default(),
            assets: AssetTracker::new(),
            events: Vec::with_capacity(config.max_events),
            media: Vec::with_capacity(config.max_media),
            pending_media: Vec::new(),
            now_ms: 0.0,
            max_events: config.max_events,
            max_media: config.max_media,
        }
    }

    /// Timestamp of the current frame in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Whether a click may start something new: false while a camera
    /// transition is in flight or the door is mid-swing.
    pub fn is_busy(&self) -> bool {
        self.transitions.is_busy() || self.door.is_opening()
    }

    /// Start a camera transition and fire its start effects. Returns false
    /// (and changes nothing) if one is already in flight.
    pub fn begin_transition(&mut self, transition: CameraTransition) -> bool {
        let code = transition.kind.code();
        let duration_ms = transition.duration_ms;
        let Some(effects) = self.transitions.begin(transition) else {
            return false;
        };
        self.emit_event(GameEvent::new(GameEvent::TRANSITION_STARTED, code, duration_ms, 0.0));
        for effect in effects {
            self.apply_effect(effect);
        }
        true
    }

    /// Per-frame wall-clock work: move the camera along the active
    /// transition, fire due media commands and age explosions.
    pub fn advance_frame(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        if let Some(outcome) = self.transitions.advance(now_ms, &mut self.camera) {
            self.emit_event(GameEvent::new(GameEvent::TRANSITION_FINISHED, outcome.kind.code(), 0.0, 0.0));
            for effect in outcome.effects {
                self.apply_effect(effect);
            }
        }
        self.flush_pending_media();
        self.effects.tick(now_ms);
    }

    fn apply_effect(&mut self, effect: TransitionEffect) {
        match effect {
            TransitionEffect::Media(command) => self.emit_media(command),
            TransitionEffect::DelayedMedia { command, delay_ms } => {
                self.pending_media.push(PendingMedia {
                    due_ms: self.now_ms + f64::from(delay_ms),
                    command,
                });
            }
            TransitionEffect::ResetDoor => self.door.reset(),
        }
    }

    fn flush_pending_media(&mut self) {
        let now = self.now_ms;
        let mut due = Vec::new();
        self.pending_media.retain(|p| {
            if p.due_ms <= now {
                due.push(p.command);
                false
            } else {
                true
            }
        });
        for command in due {
            self.emit_media(command);
        }
    }

    /// Number of media commands still waiting for their time.
    pub fn pending_media_count(&self) -> usize {
        self.pending_media.len()
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            debug!("event buffer full, dropping kind {}", event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Emit a media command to be forwarded to the host.
    pub fn emit_media(&mut self, command: MediaCommand) {
        if self.media.len() >= self.max_media {
            debug!("media buffer full, dropping {command:?}");
            return;
        }
        self.media.push(command);
    }

    /// Clear per-frame transient data (events, media commands).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.media.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
