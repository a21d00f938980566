//! The museum scene controller: corridor with a door and two video panels,
//! a planetarium behind the door, and a ship you can fly around in.

use glam::{Vec2, Vec3};
use log::{debug, info, warn};

use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::{GameEvent, MediaCommand};
use crate::components::door::Door;
use crate::components::ship::Ship;
use crate::components::target::TargetKind;
use crate::config::{SceneConfig, Viewpoint};
use crate::core::scene::BodyRegistry;
use crate::error::{AssetError, ConfigError};
use crate::extensions::transition::{CameraTransition, TransitionEffect, TransitionKind};
use crate::input::queue::{keys, InputEvent, InputQueue, KeyState};
use crate::input::router::Router;
use crate::renderer::camera::Camera3D;
use crate::systems::collision::CollisionPruner;
use crate::systems::ship::{fly_ship, follow_ship, FlightOutcome};
use crate::systems::stepper::step_bodies;

/// `kind` values of `InputEvent::Custom` sent by the host page.
pub mod commands {
    /// `a` = simulation speed multiplier.
    pub const SET_SIMULATION_SPEED: u32 = 1;
    pub const TOGGLE_ORBITS: u32 = 2;
    /// `a` = volume in [0, 1].
    pub const SET_MUSIC_VOLUME: u32 = 3;
    pub const SET_BLOOM_STRENGTH: u32 = 4;
    pub const SET_AMBIENT_INTENSITY: u32 = 5;
    pub const SET_DIRECTIONAL_INTENSITY: u32 = 6;
    /// The "back" button.
    pub const RETURN_TO_CORRIDOR: u32 = 7;
    pub const TOGGLE_SHIP: u32 = 8;
    pub const SET_PLANET_LIGHT_INTENSITY: u32 = 9;
    pub const PLAY_VIDEOS: u32 = 10;
    pub const PAUSE_VIDEOS: u32 = 11;
    pub const TOGGLE_MUSIC: u32 = 12;
    /// Pause music and every video.
    pub const STOP_MEDIA: u32 = 13;
    /// `a` = viewport width / height.
    pub const RESIZE: u32 = 99;
}

pub struct Museum {
    scene: SceneConfig,
    router: Router,
    keys: KeyState,
    pruner: CollisionPruner,
    music_playing: bool,
    /// Camera pose to restore when leaving ship mode.
    pre_ship_view: Option<Viewpoint>,
}

impl Museum {
    pub fn new() -> Self {
        Self::with_scene(SceneConfig::default())
    }

    pub fn with_scene(scene: SceneConfig) -> Self {
        let router = Router::new(&scene.panels, &BodyRegistry::default());
        Self {
            scene,
            router,
            keys: KeyState::new(),
            pruner: CollisionPruner::new(),
            music_playing: false,
            pre_ship_view: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_scene(SceneConfig::from_json(json)?))
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    fn transition(&self, kind: TransitionKind, ctx: &EngineContext, target: Viewpoint, duration_ms: f32) -> CameraTransition {
        CameraTransition::new(kind, ctx.camera.view(), target, duration_ms).with_easing(self.scene.transitions.easing)
    }

    /// Route a click at normalized device coordinates.
    pub fn click(&mut self, ctx: &mut EngineContext, ndc: Vec2) {
        if ctx.ship.active {
            debug!("click ignored: ship mode");
            return;
        }
        if ctx.is_busy() {
            debug!("click ignored: busy");
            return;
        }
        let ray = ctx.camera.ray_from_ndc(ndc);
        let Some(hit) = self.router.resolve(&ray, &ctx.registry, &ctx.door) else {
            return;
        };
        match hit.kind {
            TargetKind::Door => {
                self.open_door(ctx);
            }
            TargetKind::VideoPanel(i) => {
                self.focus_on_media(ctx, i);
            }
            TargetKind::Planet(i) => {
                self.focus_on_planet(ctx, i);
            }
        }
    }

    /// Start swinging the door. Reaching fully open triggers the move into
    /// the planetarium.
    pub fn open_door(&mut self, ctx: &mut EngineContext) -> bool {
        if ctx.is_busy() {
            return false;
        }
        ctx.door.open()
    }

    /// Fly to a point in front of planet `index`, looking at where it is now.
    pub fn focus_on_planet(&mut self, ctx: &mut EngineContext, index: usize) -> bool {
        if ctx.is_busy() {
            return false;
        }
        let Some(center) = ctx.registry.planet_world_position(index) else {
            warn!("focus on unknown planet #{index}");
            return false;
        };
        // Approach along -Z when the camera sits at the centre.
        let dir = (center - ctx.camera.position).normalize_or(Vec3::NEG_Z);
        let target = Viewpoint::new(center - dir * self.scene.transitions.planet_standoff, center);
        let t = self.transition(TransitionKind::FocusPlanet, ctx, target, self.scene.transitions.planet_ms);
        ctx.begin_transition(t)
    }

    /// Move closer to video panel `index`, pausing the other panels now and
    /// starting this panel's video shortly after arrival.
    pub fn focus_on_media(&mut self, ctx: &mut EngineContext, index: usize) -> bool {
        if ctx.is_busy() {
            return false;
        }
        let Some(panel) = self.scene.panels.get(index) else {
            warn!("focus on unknown panel #{index}");
            return false;
        };
        let cfg = &self.scene.transitions;
        let offset = ctx.camera.position - panel.center;
        let distance = offset.length();
        let dir = if distance > f32::EPSILON { offset / distance } else { Vec3::Z };
        let stop = (distance - cfg.media_approach).max(cfg.media_min_distance);
        let target = Viewpoint::new(panel.center + dir * stop, panel.center);

        let mut t = self
            .transition(TransitionKind::FocusMedia, ctx, target, cfg.media_ms)
            .on_complete(TransitionEffect::DelayedMedia {
                command: MediaCommand::PlayVideo(index),
                delay_ms: cfg.media_play_delay_ms,
            });
        for other in (0..self.scene.panels.len()).filter(|&j| j != index) {
            t = t.on_start(TransitionEffect::Media(MediaCommand::PauseVideo(other)));
        }
        ctx.begin_transition(t)
    }

    /// Fly from the corridor into the planetarium and start the music.
    pub fn enter_planetarium(&mut self, ctx: &mut EngineContext) -> bool {
        let t = self
            .transition(TransitionKind::EnterPlanetarium, ctx, self.scene.planetarium, self.scene.transitions.planetarium_ms)
            .on_start(TransitionEffect::Media(MediaCommand::PlayMusic));
        let started = ctx.begin_transition(t);
        if started {
            self.music_playing = true;
        }
        started
    }

    /// Fly back to the corridor, pausing the music; the door snaps shut on
    /// arrival. Refused while busy, so a swinging door always finishes its
    /// move into the planetarium.
    pub fn return_to_corridor(&mut self, ctx: &mut EngineContext) -> bool {
        if ctx.is_busy() {
            debug!("return refused: busy");
            return false;
        }
        if ctx.ship.active {
            self.leave_ship(ctx);
        }
        let t = self
            .transition(TransitionKind::ReturnToCorridor, ctx, self.scene.corridor, self.scene.transitions.corridor_ms)
            .on_start(TransitionEffect::Media(MediaCommand::PauseMusic))
            .on_complete(TransitionEffect::ResetDoor);
        let started = ctx.begin_transition(t);
        if started {
            self.music_playing = false;
        }
        started
    }

    /// Enter or leave ship mode. Refused while the camera is in flight or
    /// the door is swinging.
    pub fn toggle_ship(&mut self, ctx: &mut EngineContext) -> bool {
        if ctx.is_busy() {
            debug!("ship toggle refused: busy");
            return false;
        }
        if ctx.ship.active {
            self.leave_ship(ctx);
        } else {
            self.pre_ship_view = Some(ctx.camera.view());
            ctx.ship.respawn(&self.scene.ship);
            ctx.ship.active = true;
            info!("ship mode on");
            ctx.emit_event(GameEvent::new(GameEvent::SHIP_MODE, 1.0, 0.0, 0.0));
        }
        true
    }

    fn leave_ship(&mut self, ctx: &mut EngineContext) {
        ctx.ship.active = false;
        ctx.ship.velocity = Vec3::ZERO;
        if let Some(view) = self.pre_ship_view.take() {
            ctx.camera.set_view(view);
        }
        info!("ship mode off");
        ctx.emit_event(GameEvent::new(GameEvent::SHIP_MODE, 0.0, 0.0, 0.0));
    }

    fn set_videos(&mut self, ctx: &mut EngineContext, play: bool) {
        for i in 0..self.scene.panels.len() {
            ctx.emit_media(if play { MediaCommand::PlayVideo(i) } else { MediaCommand::PauseVideo(i) });
        }
    }

    fn set_music(&mut self, ctx: &mut EngineContext, play: bool) {
        self.music_playing = play;
        ctx.emit_media(if play { MediaCommand::PlayMusic } else { MediaCommand::PauseMusic });
    }

    fn command(&mut self, ctx: &mut EngineContext, kind: u32, a: f32) {
        match kind {
            commands::SET_SIMULATION_SPEED => ctx.params.set_simulation_speed(a),
            commands::TOGGLE_ORBITS => ctx.params.show_orbits = !ctx.params.show_orbits,
            commands::SET_MUSIC_VOLUME => ctx.params.set_music_volume(a),
            commands::SET_BLOOM_STRENGTH => ctx.params.set_bloom_strength(a),
            commands::SET_AMBIENT_INTENSITY => ctx.params.set_ambient_intensity(a),
            commands::SET_DIRECTIONAL_INTENSITY => ctx.params.set_directional_intensity(a),
            commands::SET_PLANET_LIGHT_INTENSITY => ctx.params.set_planet_light_intensity(a),
            commands::RETURN_TO_CORRIDOR => {
                self.return_to_corridor(ctx);
            }
            commands::TOGGLE_SHIP => {
                self.toggle_ship(ctx);
            }
            commands::PLAY_VIDEOS => self.set_videos(ctx, true),
            commands::PAUSE_VIDEOS => self.set_videos(ctx, false),
            commands::TOGGLE_MUSIC => {
                let play = !self.music_playing;
                self.set_music(ctx, play);
            }
            commands::STOP_MEDIA => {
                self.set_music(ctx, false);
                self.set_videos(ctx, false);
            }
            commands::RESIZE => ctx.camera.set_aspect(a),
            other => debug!("unknown command {other}"),
        }
    }
}

impl Default for Museum {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Museum {
    fn config(&self) -> GameConfig {
        let asteroids: usize = self.scene.belts.iter().map(|b| b.count).sum();
        let moons = self.scene.planets.iter().filter(|p| p.moon.is_some()).count();
        let defaults = GameConfig::default();
        GameConfig {
            max_bodies: defaults.max_bodies.max(1 + self.scene.planets.len() + moons),
            max_asteroids: defaults.max_asteroids.max(asteroids),
            ..defaults
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), ConfigError> {
        self.scene.validate()?;
        ctx.registry = BodyRegistry::from_config(&self.scene, &mut ctx.effects.rng);
        ctx.camera = Camera3D::new(&self.scene.camera, self.scene.corridor);
        ctx.door = Door::new(&self.scene.door);
        ctx.ship = Ship::new(&self.scene.ship);
        ctx.effects.explosion_ms = self.scene.explosion_ms;
        self.router = Router::new(&self.scene.panels, &ctx.registry);
        info!(
            "museum ready: {} planets, {} asteroids, {} panels",
            ctx.registry.len(),
            ctx.registry.asteroid_count(),
            self.scene.panels.len()
        );
        Ok(())
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Click { x, y } => self.click(ctx, Vec2::new(x, y)),
                InputEvent::KeyDown { key_code } => {
                    if self.keys.apply(event) && key_code == keys::G {
                        self.toggle_ship(ctx);
                    }
                }
                InputEvent::KeyUp { .. } => {
                    self.keys.apply(event);
                }
                InputEvent::Custom { kind, a, .. } => self.command(ctx, kind, a),
            }
        }
    }

    /// Stepper → pruner → door → ship, in that order.
    fn fixed_update(&mut self, ctx: &mut EngineContext, dt: f32) {
        step_bodies(&mut ctx.registry, dt, ctx.params.simulation_speed, ctx.params.sun_rotation_speed);
        self.pruner.prune(&mut ctx.registry, &mut ctx.effects, &mut ctx.events);

        if ctx.door.tick(dt) {
            ctx.emit_event(GameEvent::new(GameEvent::DOOR_OPENED, 0.0, 0.0, 0.0));
            self.enter_planetarium(ctx);
        }

        if ctx.ship.active {
            if let FlightOutcome::Blocked(i) = fly_ship(&mut ctx.ship, &self.keys, &self.scene.ship, &ctx.registry, dt) {
                ctx.emit_event(GameEvent::new(GameEvent::SHIP_BLOCKED, i as f32, 0.0, 0.0));
            }
            follow_ship(&mut ctx.camera, &ctx.ship, &self.scene.ship, dt);
        }
    }

    fn asset_loaded(&mut self, _ctx: &mut EngineContext, name: &str) {
        debug!("asset `{name}` loaded");
    }

    /// A failed texture hides its planet; the planet keeps orbiting.
    fn asset_failed(&mut self, ctx: &mut EngineContext, error: AssetError) {
        warn!("{error}");
        if let AssetError::LoadFailed { name, .. } = &error {
            if let Some(body) = ctx.assets.owner(name).map(str::to_owned) {
                if ctx.registry.set_visible(&body, false) {
                    info!("planet `{body}` hidden");
                }
            }
        }
    }

    fn media_blocked(&mut self, _ctx: &mut EngineContext, error: AssetError) {
        warn!("{error}; waiting for a user gesture");
        if let AssetError::MediaBlocked { name, .. } = &error {
            if *name == self.scene.music {
                self.music_playing = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::AssetManifest;
    use crate::assets::registry::AssetTracker;
    use crate::components::door::DoorState;
    use crate::components::orbit::{Orbit, OrbitBody};
    use crate::core::transform::LocalTransform;

    fn setup() -> (Museum, EngineContext) {
        let mut museum = Museum::new();
        let mut ctx = EngineContext::new(&museum.config());
        museum.init(&mut ctx).unwrap();
        (museum, ctx)
    }

    /// NDC of a world point as seen from the current camera.
    fn ndc_of(ctx: &EngineContext, p: Vec3) -> Vec2 {
        let ndc = ctx.camera.world_to_ndc(p);
        Vec2::new(ndc.x, ndc.y)
    }

    fn click_at(museum: &mut Museum, ctx: &mut EngineContext, ndc: Vec2) {
        let mut q = InputQueue::new();
        q.push(InputEvent::Click { x: ndc.x, y: ndc.y });
        museum.handle_input(ctx, &q);
    }

    fn run_frames(museum: &mut Museum, ctx: &mut EngineContext, from_ms: f64, frames: u32) -> f64 {
        let dt = museum.config().fixed_dt;
        let mut now = from_ms;
        for _ in 0..frames {
            ctx.clear_frame_data();
            museum.fixed_update(ctx, dt);
            ctx.advance_frame(now);
            now += 1000.0 / 60.0;
        }
        now
    }

    /// Put the camera in the planetarium looking at a planet.
    fn look_at_planet(ctx: &mut EngineContext, index: usize) -> Vec3 {
        let p = ctx.registry.planet_world_position(index).unwrap();
        ctx.camera.set_view(Viewpoint::new(p + Vec3::new(0.0, 0.0, 20.0), p));
        p
    }

    #[test]
    fn init_builds_the_scene() {
        let (museum, ctx) = setup();
        assert_eq!(ctx.registry.len(), 8);
        assert_eq!(ctx.registry.asteroid_count(), 1100);
        assert_eq!(ctx.camera.view(), museum.scene().corridor);
        assert_eq!(museum.router().targets().len(), 1 + 2 + 8);
    }

    #[test]
    fn invalid_scene_fails_init() {
        let mut scene = SceneConfig::default();
        scene.planets[0].distance = -1.0;
        let mut museum = Museum::with_scene(scene);
        let mut ctx = EngineContext::default();
        assert!(matches!(museum.init(&mut ctx), Err(ConfigError::NonPositiveAxis { .. })));
    }

    #[test]
    fn clicking_marte_starts_one_transition_to_it() {
        let (mut museum, mut ctx) = setup();
        let marte = ctx.registry.index_of("Marte").unwrap();
        let p = look_at_planet(&mut ctx, marte);

        let ndc = ndc_of(&ctx, p);
        click_at(&mut museum, &mut ctx, ndc);

        let active = ctx.transitions.active().expect("a transition is in flight");
        assert_eq!(active.kind, TransitionKind::FocusPlanet);
        assert_eq!(active.target.look_at, p);
        let started = ctx.events.iter().filter(|e| e.kind == GameEvent::TRANSITION_STARTED).count();
        assert_eq!(started, 1);

        // The camera stops `planet_standoff` short of the planet.
        let standoff = museum.scene().transitions.planet_standoff;
        assert!((active.target.position.distance(p) - standoff).abs() < 1e-3);
    }

    #[test]
    fn clicks_while_busy_do_not_retarget() {
        let (mut museum, mut ctx) = setup();
        let marte = ctx.registry.index_of("Marte").unwrap();
        let p = look_at_planet(&mut ctx, marte);
        let ndc = ndc_of(&ctx, p);
        click_at(&mut museum, &mut ctx, ndc);
        let target = ctx.transitions.active().unwrap().target;

        ctx.advance_frame(0.0);
        ctx.advance_frame(500.0);
        let giove = ctx.registry.index_of("Giove").unwrap();
        assert!(!museum.focus_on_planet(&mut ctx, giove));
        click_at(&mut museum, &mut ctx, ndc);
        assert_eq!(ctx.transitions.active().unwrap().target, target);

        ctx.advance_frame(1500.0);
        assert!(!ctx.is_busy());
        assert_eq!(ctx.camera.view(), target);
    }

    #[test]
    fn door_click_opens_then_enters_planetarium() {
        let (mut museum, mut ctx) = setup();
        // The corridor camera looks straight at the closed door.
        click_at(&mut museum, &mut ctx, Vec2::ZERO);
        assert_eq!(ctx.door.state(), DoorState::Opening);
        assert!(ctx.is_busy());

        // Repeated opens do not speed the swing up.
        let before = ctx.door.fraction();
        assert!(!museum.open_door(&mut ctx));
        assert_eq!(ctx.door.fraction(), before);

        // 0.02 of the swing per reference frame: about 50 steps to open.
        let mut now = run_frames(&mut museum, &mut ctx, 0.0, 49);
        assert_eq!(ctx.door.state(), DoorState::Opening);
        while ctx.door.state() == DoorState::Opening {
            now = run_frames(&mut museum, &mut ctx, now, 1);
        }
        assert_eq!(ctx.door.state(), DoorState::Open);

        // Same frame: door event, room change and music.
        let active = ctx.transitions.active().expect("room change started");
        assert_eq!(active.kind, TransitionKind::EnterPlanetarium);
        assert!(ctx.events.iter().any(|e| e.kind == GameEvent::DOOR_OPENED));
        assert!(ctx.media.contains(&MediaCommand::PlayMusic));
        assert!(museum.is_music_playing());

        run_frames(&mut museum, &mut ctx, now, 130);
        assert!(!ctx.transitions.is_busy());
        assert_eq!(ctx.camera.view(), museum.scene().planetarium);
    }

    #[test]
    fn return_to_corridor_resets_the_door() {
        let (mut museum, mut ctx) = setup();
        museum.open_door(&mut ctx);
        let now = run_frames(&mut museum, &mut ctx, 0.0, 60);
        run_frames(&mut museum, &mut ctx, now, 130);
        assert_eq!(ctx.door.state(), DoorState::Open);
        ctx.clear_frame_data();

        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: commands::RETURN_TO_CORRIDOR, a: 0.0, b: 0.0, c: 0.0 });
        museum.handle_input(&mut ctx, &q);
        assert_eq!(ctx.media, vec![MediaCommand::PauseMusic]);
        assert_eq!(ctx.door.state(), DoorState::Open);

        ctx.advance_frame(10_000.0);
        ctx.advance_frame(11_500.0);
        assert_eq!(ctx.door.state(), DoorState::Closed);
        assert_eq!(ctx.door.fraction(), 0.0);
        assert_eq!(ctx.camera.view(), museum.scene().corridor);
    }

    #[test]
    fn panel_click_pauses_the_other_and_plays_after_arrival() {
        let (mut museum, mut ctx) = setup();
        let sputnik = museum.scene().panels[1].center;
        ctx.camera.set_view(Viewpoint::new(Vec3::new(10.0, 4.0, -5.0), sputnik));
        click_at(&mut museum, &mut ctx, Vec2::ZERO);

        let active = ctx.transitions.active().unwrap();
        assert_eq!(active.kind, TransitionKind::FocusMedia);
        assert_eq!(active.target.look_at, sputnik);
        // 19.9 away, approach by 5.
        assert!((active.target.position - Vec3::new(10.0, 4.0, -24.9 + 14.9)).length() < 1e-3);
        assert_eq!(ctx.media, vec![MediaCommand::PauseVideo(0)]);

        ctx.clear_frame_data();
        ctx.advance_frame(0.0);
        ctx.advance_frame(1500.0);
        assert!(ctx.media.is_empty());
        ctx.advance_frame(2000.0);
        assert_eq!(ctx.media, vec![MediaCommand::PlayVideo(1)]);
    }

    #[test]
    fn media_approach_never_gets_too_close() {
        let (mut museum, mut ctx) = setup();
        let apollo = museum.scene().panels[0].center;
        ctx.camera.set_view(Viewpoint::new(apollo + Vec3::new(0.0, 0.0, 2.0), apollo));
        assert!(museum.focus_on_media(&mut ctx, 0));
        let target = ctx.transitions.active().unwrap().target;
        let min = museum.scene().transitions.media_min_distance;
        assert!((target.position.distance(apollo) - min).abs() < 1e-4);
    }

    #[test]
    fn full_revolution_scenario() {
        let (mut museum, mut ctx) = setup();
        let mut reg = BodyRegistry::new(LocalTransform::default(), 1.0);
        reg.push_planet(OrbitBody::new("Terra", Orbit::new(6.0, 4.8, 0.01), 0.5));
        ctx.registry = reg;
        let start = ctx.registry.planet_world_position(0).unwrap();

        for _ in 0..628 {
            museum.fixed_update(&mut ctx, 1.0);
        }
        let phase = ctx.registry.planets()[0].orbit.phase;
        assert!((phase - 6.28).abs() < 1e-2 || phase < 1e-2, "phase = {phase}");
        let end = ctx.registry.planet_world_position(0).unwrap();
        assert!(end.distance(start) < 2e-2);
    }

    #[test]
    fn ship_mode_toggles_and_swallows_clicks() {
        let (mut museum, mut ctx) = setup();
        let view = ctx.camera.view();
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: keys::G });
        museum.handle_input(&mut ctx, &q);
        assert!(ctx.ship.active);

        click_at(&mut museum, &mut ctx, Vec2::ZERO);
        assert_eq!(ctx.door.state(), DoorState::Closed);

        run_frames(&mut museum, &mut ctx, 0.0, 30);
        assert!(ctx.camera.position.distance(ctx.ship.position) < 7.0);

        // Key repeat is not a second press.
        museum.handle_input(&mut ctx, &q);
        assert!(ctx.ship.active);

        let mut q = InputQueue::new();
        q.push(InputEvent::KeyUp { key_code: keys::G });
        q.push(InputEvent::KeyDown { key_code: keys::G });
        museum.handle_input(&mut ctx, &q);
        assert!(!ctx.ship.active);
        assert_eq!(ctx.camera.view(), view);
    }

    #[test]
    fn ship_toggle_refused_mid_transition() {
        let (mut museum, mut ctx) = setup();
        assert!(museum.focus_on_planet(&mut ctx, 0));
        assert!(!museum.toggle_ship(&mut ctx));
        assert!(!ctx.ship.active);
    }

    #[test]
    fn panel_commands_update_params() {
        let (mut museum, mut ctx) = setup();
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: commands::SET_SIMULATION_SPEED, a: 9.0, b: 0.0, c: 0.0 });
        q.push(InputEvent::Custom { kind: commands::TOGGLE_ORBITS, a: 0.0, b: 0.0, c: 0.0 });
        q.push(InputEvent::Custom { kind: commands::SET_MUSIC_VOLUME, a: 0.25, b: 0.0, c: 0.0 });
        q.push(InputEvent::Custom { kind: commands::RESIZE, a: 2.0, b: 0.0, c: 0.0 });
        q.push(InputEvent::Custom { kind: commands::TOGGLE_MUSIC, a: 0.0, b: 0.0, c: 0.0 });
        museum.handle_input(&mut ctx, &q);

        assert_eq!(ctx.params.simulation_speed, 5.0);
        assert!(!ctx.params.show_orbits);
        assert_eq!(ctx.params.music_volume, 0.25);
        assert_eq!(ctx.camera.aspect, 2.0);
        assert_eq!(ctx.media, vec![MediaCommand::PlayMusic]);
        assert!(museum.is_music_playing());
    }

    #[test]
    fn failed_texture_hides_its_planet() {
        let (mut museum, mut ctx) = setup();
        let manifest = AssetManifest::from_json(
            r#"{ "textures": { "mars": { "path": "mars.jpg", "body": "Marte" } } }"#,
        )
        .unwrap();
        ctx.assets = AssetTracker::from_manifest(&manifest);
        let err = ctx.assets.mark_failed("mars", "404").unwrap();
        museum.asset_failed(&mut ctx, err);

        let marte = ctx.registry.index_of("Marte").unwrap();
        assert!(!ctx.registry.planets()[marte].visible);

        // Hidden planets cannot be clicked.
        let p = look_at_planet(&mut ctx, marte);
        let ndc = ndc_of(&ctx, p);
        click_at(&mut museum, &mut ctx, ndc);
        assert!(!ctx.transitions.is_busy());
    }

    #[test]
    fn ship_toggle_refused_while_door_swings() {
        let (mut museum, mut ctx) = setup();
        assert!(museum.open_door(&mut ctx));
        assert!(!museum.toggle_ship(&mut ctx));
        assert!(!ctx.ship.active);

        // The room change runs undisturbed and lands in the planetarium.
        let now = run_frames(&mut museum, &mut ctx, 0.0, 60);
        run_frames(&mut museum, &mut ctx, now, 340);
        assert!(!ctx.ship.active);
        assert_eq!(ctx.door.state(), DoorState::Open);
        assert_eq!(ctx.camera.view(), museum.scene().planetarium);
        assert!(museum.is_music_playing());
    }

    #[test]
    fn back_button_waits_for_the_door() {
        let (mut museum, mut ctx) = setup();
        assert!(museum.open_door(&mut ctx));
        assert!(!museum.return_to_corridor(&mut ctx));
        assert!(ctx.media.is_empty());

        let now = run_frames(&mut museum, &mut ctx, 0.0, 60);
        run_frames(&mut museum, &mut ctx, now, 130);
        assert_eq!(ctx.camera.view(), museum.scene().planetarium);
        assert!(museum.return_to_corridor(&mut ctx));
    }

    #[test]
    fn focus_from_inside_a_planet_backs_off_along_z() {
        let (mut museum, mut ctx) = setup();
        let center = ctx.registry.planet_world_position(0).unwrap();
        ctx.camera.set_view(Viewpoint::new(center, center + Vec3::X));
        assert!(museum.focus_on_planet(&mut ctx, 0));

        let target = ctx.transitions.active().unwrap().target;
        let standoff = museum.scene().transitions.planet_standoff;
        assert!((target.position - (center + Vec3::Z * standoff)).length() < 1e-4);
        assert_eq!(target.look_at, center);
    }
}
