pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod config;
pub mod error;
pub mod museum;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{GameEvent, MediaCommand};
pub use components::belt::{AsteroidParticle, BeltGroup};
pub use components::door::{Door, DoorState};
pub use components::orbit::{MoonOrbit, Orbit, OrbitBody};
pub use components::ship::Ship;
pub use components::target::{HitVolume, InteractiveTarget, TargetKind};
pub use config::{DebugParams, SceneConfig, Viewpoint};
pub use crate::core::scene::BodyRegistry;
pub use crate::core::time::{FixedTimestep, FrameClock};
pub use crate::core::transform::LocalTransform;
pub use error::{AssetError, ConfigError};
pub use renderer::instance::{AsteroidInstance, BodyInstance, ExplosionInstance, RenderBuffer};
pub use renderer::camera::{Camera3D, Ray};
pub use input::queue::{InputEvent, InputQueue};
pub use input::router::Router;
pub use assets::manifest::AssetManifest;
pub use assets::registry::{AssetStatus, AssetTracker};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use systems::effects::{EffectsState, Explosion};
pub use museum::Museum;

// Camera fly-throughs
pub use extensions::{
    Easing, lerp, lerp_vec3, ease_vec3,
    CameraTransition, TransitionEffect, TransitionEngine, TransitionKind,
};
