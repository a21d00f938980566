pub mod camera;
pub mod instance;

// Re-export key types for convenient access
pub use camera::{Camera3D, CameraUniform, Ray};
pub use instance::{AsteroidInstance, BodyInstance, ExplosionInstance, RenderBuffer};
