// extensions/transition.rs
//
// Camera fly-throughs: time-boxed, eased interpolation of camera position
// and look-at between two viewpoints. At most one runs at a time.
//
// Usage:
//   let mut engine = TransitionEngine::new();
//   engine.begin(CameraTransition::new(kind, camera.view(), dest, 1500.0));
//   engine.advance(now_ms, &mut camera);  // every animation frame

use log::debug;

use crate::api::types::MediaCommand;
use crate::config::Viewpoint;
use crate::renderer::camera::Camera3D;
use super::easing::{ease_vec3, Easing};

/// Which trigger started a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    EnterPlanetarium,
    ReturnToCorridor,
    FocusPlanet,
    FocusMedia,
}

impl TransitionKind {
    /// Numeric code used in game events.
    pub fn code(self) -> f32 {
        match self {
            TransitionKind::EnterPlanetarium => 1.0,
            TransitionKind::ReturnToCorridor => 2.0,
            TransitionKind::FocusPlanet => 3.0,
            TransitionKind::FocusMedia => 4.0,
        }
    }
}

/// Side effect fired when a transition starts or finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionEffect {
    /// Forward a media command to the host right away.
    Media(MediaCommand),
    /// Forward a media command after a wall-clock delay.
    DelayedMedia { command: MediaCommand, delay_ms: f32 },
    /// Snap the corridor door shut.
    ResetDoor,
}

/// A single camera transition.
#[derive(Debug, Clone)]
pub struct CameraTransition {
    pub kind: TransitionKind,
    pub start: Viewpoint,
    pub target: Viewpoint,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: f32,
    pub easing: Easing,
    pub on_start: Vec<TransitionEffect>,
    pub on_complete: Vec<TransitionEffect>,
    /// Timestamp of the first frame that advanced this transition.
    started_ms: Option<f64>,
    /// Raw progress in [0, 1].
    t: f32,
}

impl CameraTransition {
    pub fn new(kind: TransitionKind, start: Viewpoint, target: Viewpoint, duration_ms: f32) -> Self {
        Self {
            kind,
            start,
            target,
            duration_ms,
            easing: Easing::Linear,
            on_start: Vec::new(),
            on_complete: Vec::new(),
            started_ms: None,
            t: 0.0,
        }
    }

    // -- Builder methods --

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_start(mut self, effect: TransitionEffect) -> Self {
        self.on_start.push(effect);
        self
    }

    pub fn on_complete(mut self, effect: TransitionEffect) -> Self {
        self.on_complete.push(effect);
        self
    }

    /// Normalized progress [0, 1], before easing.
    pub fn progress(&self) -> f32 {
        self.t
    }

    pub fn is_complete(&self) -> bool {
        self.t >= 1.0
    }

    /// Camera pose at the current progress. Exactly `target` once complete.
    pub fn sample(&self) -> Viewpoint {
        Viewpoint::new(
            ease_vec3(self.start.position, self.target.position, self.t, self.easing),
            ease_vec3(self.start.look_at, self.target.look_at, self.t, self.easing),
        )
    }

    /// Update progress from a frame timestamp. The first call latches the
    /// start time, so it always yields `t = 0`.
    fn update(&mut self, now_ms: f64) {
        let started = *self.started_ms.get_or_insert(now_ms);
        self.t = if self.duration_ms > 0.0 {
            ((now_ms - started) as f32 / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
    }
}

/// What a finished transition leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub kind: TransitionKind,
    pub effects: Vec<TransitionEffect>,
}

/// Idle → Transitioning → Idle. Holds the single in-flight transition.
#[derive(Debug, Default)]
pub struct TransitionEngine {
    active: Option<CameraTransition>,
    completed: u32,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transition is in flight.
    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&CameraTransition> {
        self.active.as_ref()
    }

    /// Number of transitions that ran to completion.
    pub fn completed_count(&self) -> u32 {
        self.completed
    }

    /// Start a transition. While another one is in flight the request is
    /// dropped and `None` is returned; otherwise the `on_start` effects are
    /// handed back for the caller to fire.
    pub fn begin(&mut self, mut transition: CameraTransition) -> Option<Vec<TransitionEffect>> {
        if let Some(current) = &self.active {
            debug!(
                "transition {:?} dropped: {:?} still in flight",
                transition.kind, current.kind
            );
            return None;
        }
        debug!("transition {:?} begins ({} ms)", transition.kind, transition.duration_ms);
        let on_start = std::mem::take(&mut transition.on_start);
        self.active = Some(transition);
        Some(on_start)
    }

    /// Apply the in-flight transition to the camera for this frame. On the
    /// frame it completes, the camera lands exactly on the target, the engine
    /// returns to idle and the `on_complete` effects are returned.
    pub fn advance(&mut self, now_ms: f64, camera: &mut Camera3D) -> Option<TransitionOutcome> {
        let transition = self.active.as_mut()?;
        transition.update(now_ms);
        camera.set_view(transition.sample());

        if !transition.is_complete() {
            return None;
        }
        let finished = self.active.take()?;
        self.completed += 1;
        debug!("transition {:?} complete", finished.kind);
        Some(TransitionOutcome {
            kind: finished.kind,
            effects: finished.on_complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use glam::Vec3;

    fn corridor() -> Viewpoint {
        Viewpoint::new(Vec3::new(0.0, 5.0, -5.0), Vec3::new(0.0, 5.0, -12.5))
    }

    fn planetarium() -> Viewpoint {
        Viewpoint::new(Vec3::new(0.0, 7.0, -35.0), Vec3::new(0.0, 7.0, -40.0))
    }

    fn camera() -> Camera3D {
        Camera3D::new(&CameraConfig::default(), corridor())
    }

    #[test]
    fn first_frame_is_t_zero() {
        let mut cam = camera();
        let mut engine = TransitionEngine::new();
        engine.begin(CameraTransition::new(TransitionKind::EnterPlanetarium, cam.view(), planetarium(), 2000.0));
        assert!(engine.advance(10_000.0, &mut cam).is_none());
        assert_eq!(cam.view(), corridor());
        assert_eq!(engine.active().unwrap().progress(), 0.0);
    }

    #[test]
    fn linear_midpoint() {
        let mut cam = camera();
        let mut engine = TransitionEngine::new();
        engine.begin(CameraTransition::new(TransitionKind::EnterPlanetarium, cam.view(), planetarium(), 2000.0));
        engine.advance(0.0, &mut cam);
        engine.advance(1000.0, &mut cam);
        assert!((cam.position - Vec3::new(0.0, 6.0, -20.0)).length() < 1e-4);
        assert!((cam.target - Vec3::new(0.0, 6.0, -26.25)).length() < 1e-4);
    }

    #[test]
    fn completion_lands_exactly_and_never_overshoots() {
        let mut cam = camera();
        let mut engine = TransitionEngine::new();
        let target = Viewpoint::new(Vec3::new(1.1, 2.2, -33.3), Vec3::new(-4.4, 5.5, -66.6));
        engine.begin(
            CameraTransition::new(TransitionKind::FocusPlanet, cam.view(), target, 1500.0)
                .with_easing(Easing::Smoothstep),
        );
        engine.advance(0.0, &mut cam);
        let mut done = None;
        let mut now = 0.0;
        while done.is_none() {
            now += 16.7;
            done = engine.advance(now, &mut cam);
            // Position never passes the target along z.
            assert!(cam.position.z >= target.position.z);
        }
        assert_eq!(cam.position, target.position);
        assert_eq!(cam.target, target.look_at);
        assert!(!engine.is_busy());
        assert_eq!(engine.completed_count(), 1);

        // Later frames leave the camera alone.
        assert!(engine.advance(now + 5000.0, &mut cam).is_none());
        assert_eq!(cam.position, target.position);
    }

    #[test]
    fn busy_engine_rejects_and_keeps_target() {
        let mut cam = camera();
        let mut engine = TransitionEngine::new();
        assert!(engine
            .begin(CameraTransition::new(TransitionKind::EnterPlanetarium, cam.view(), planetarium(), 2000.0))
            .is_some());
        engine.advance(0.0, &mut cam);
        let intruder = Viewpoint::new(Vec3::splat(99.0), Vec3::ZERO);
        assert!(engine
            .begin(CameraTransition::new(TransitionKind::FocusPlanet, cam.view(), intruder, 1500.0))
            .is_none());
        let active = engine.active().unwrap();
        assert_eq!(active.kind, TransitionKind::EnterPlanetarium);
        assert_eq!(active.target, planetarium());
    }

    #[test]
    fn effects_are_split_between_start_and_completion() {
        let mut cam = camera();
        let mut engine = TransitionEngine::new();
        let started = engine
            .begin(
                CameraTransition::new(TransitionKind::ReturnToCorridor, planetarium(), corridor(), 1500.0)
                    .on_start(TransitionEffect::Media(MediaCommand::PauseMusic))
                    .on_complete(TransitionEffect::ResetDoor),
            )
            .unwrap();
        assert_eq!(started, vec![TransitionEffect::Media(MediaCommand::PauseMusic)]);
        engine.advance(0.0, &mut cam);
        let outcome = engine.advance(1500.0, &mut cam).unwrap();
        assert_eq!(outcome.kind, TransitionKind::ReturnToCorridor);
        assert_eq!(outcome.effects, vec![TransitionEffect::ResetDoor]);
    }

    #[test]
    fn a_new_transition_may_start_after_completion() {
        let mut cam = camera();
        let mut engine = TransitionEngine::new();
        engine.begin(CameraTransition::new(TransitionKind::EnterPlanetarium, cam.view(), planetarium(), 100.0));
        engine.advance(0.0, &mut cam);
        engine.advance(100.0, &mut cam);
        assert!(engine
            .begin(CameraTransition::new(TransitionKind::ReturnToCorridor, cam.view(), corridor(), 100.0))
            .is_some());
    }
}
