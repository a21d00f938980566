// extensions/mod.rs
//
// Camera fly-throughs and the easing curves they use.
// Decoupled from the body registry: transitions only know about viewpoints
// and the camera they drive.

pub mod easing;
pub mod transition;

pub use easing::{Easing, lerp, lerp_vec3, ease_vec3};
pub use transition::{
    CameraTransition, TransitionEffect, TransitionEngine, TransitionKind, TransitionOutcome,
};
