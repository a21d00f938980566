use log::{info, warn};
use orrery_engine::{
    AssetError, AssetManifest, AssetTracker, ConfigError, EngineContext, FixedTimestep,
    FrameClock, FrameHeader, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
    RenderBuffer,
};
use orrery_engine::api::types::MediaCommand;
use orrery_engine::renderer::camera::CameraUniform;
use orrery_engine::systems::render::{build_render_buffer, write_header};

/// Generic runner that wires a [`Game`] into the browser frame loop.
///
/// The web crate keeps a single `thread_local!` runner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    header: FrameHeader,
    camera_buffer: [f32; CameraUniform::FLOATS],
    /// Flat `[kind, panel]` pairs for this frame's media commands.
    media_buffer: Vec<f32>,
    clock: FrameClock,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::new(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(
                config.max_bodies,
                config.max_asteroids,
                config.max_explosions,
            ),
            header: FrameHeader::new(&layout),
            camera_buffer: [0.0; CameraUniform::FLOATS],
            media_buffer: Vec::with_capacity(config.max_media * MediaCommand::FLOATS),
            clock: FrameClock::new(),
            timestep: FixedTimestep::new(config.fixed_dt),
            game,
            layout,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction. On error the
    /// runner stays inert: ticks do nothing and the buffers stay empty.
    pub fn init(&mut self) -> Result<(), ConfigError> {
        self.game.init(&mut self.ctx)?;
        self.initialized = true;
        self.snapshot();
        info!(
            "runner ready: {} floats per frame buffer",
            self.layout.buffer_total_floats
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Push an input event into the queue. Consumed on the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one animation frame. `now_ms` is the host's monotonic frame
    /// timestamp.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }
        let frame_dt = self.clock.tick(now_ms);

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.game.handle_input(&mut self.ctx, &self.input);
        self.input.clear();

        let steps = self.timestep.accumulate(frame_dt);
        let dt = self.timestep.dt();
        for _ in 0..steps {
            self.game.fixed_update(&mut self.ctx, dt);
        }

        self.game.frame(&mut self.ctx, frame_dt);
        self.ctx.advance_frame(now_ms);

        self.snapshot();
    }

    fn snapshot(&mut self) {
        build_render_buffer(&self.ctx, &mut self.render_buffer);
        write_header(&self.ctx, &self.render_buffer, self.clock.frame(), &mut self.header);

        let camera = self.ctx.camera.uniform();
        self.camera_buffer = camera_floats(&camera);

        self.media_buffer.clear();
        for command in self.ctx.media.iter().take(self.layout.max_media) {
            self.media_buffer.extend_from_slice(&command.to_floats());
        }
    }

    // ---- Asset bookkeeping ----

    /// Replace the tracked assets with those listed in a manifest.
    /// Returns the number of entries tracked.
    pub fn load_manifest(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let manifest = AssetManifest::from_json(json)?;
        self.ctx.assets = AssetTracker::from_manifest(&manifest);
        Ok(manifest.len())
    }

    pub fn asset_loaded(&mut self, name: &str) {
        match self.ctx.assets.mark_loaded(name) {
            Ok(()) => self.game.asset_loaded(&mut self.ctx, name),
            Err(e) => warn!("{e}"),
        }
    }

    pub fn asset_failed(&mut self, name: &str, reason: &str) {
        match self.ctx.assets.mark_failed(name, reason) {
            Ok(error) => self.game.asset_failed(&mut self.ctx, error),
            Err(e) => warn!("{e}"),
        }
    }

    pub fn media_blocked(&mut self, name: &str, reason: &str) {
        let error = AssetError::MediaBlocked { name: name.to_owned(), reason: reason.to_owned() };
        self.game.media_blocked(&mut self.ctx, error);
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera_buffer.as_ptr()
    }

    pub fn bodies_ptr(&self) -> *const f32 {
        self.render_buffer.bodies_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.render_buffer.body_count()
    }

    pub fn asteroids_ptr(&self) -> *const f32 {
        self.render_buffer.asteroids_ptr()
    }

    pub fn asteroid_count(&self) -> u32 {
        self.render_buffer.asteroid_count()
    }

    pub fn explosions_ptr(&self) -> *const f32 {
        self.render_buffer.explosions_ptr()
    }

    pub fn explosion_count(&self) -> u32 {
        self.render_buffer.explosion_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    /// Events the host may read this frame, capped at the event section size.
    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    pub fn media_ptr(&self) -> *const f32 {
        self.media_buffer.as_ptr()
    }

    pub fn media_len(&self) -> u32 {
        (self.media_buffer.len() / MediaCommand::FLOATS) as u32
    }

    /// Current panel values as JSON.
    pub fn params_json(&self) -> String {
        self.ctx.params.to_json()
    }

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    pub fn camera(&self) -> &[f32] {
        &self.camera_buffer
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Capacity accessors ----

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_asteroids(&self) -> u32 {
        self.layout.max_asteroids as u32
    }

    pub fn max_explosions(&self) -> u32 {
        self.layout.max_explosions as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_media(&self) -> u32 {
        self.layout.max_media as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn fixed_dt(&self) -> f32 {
        self.config.fixed_dt
    }
}

fn camera_floats(camera: &CameraUniform) -> [f32; CameraUniform::FLOATS] {
    let [px, py, pz] = camera.position;
    let [tx, ty, tz] = camera.target;
    [px, py, pz, camera.fov_deg, tx, ty, tz, camera.aspect]
}
