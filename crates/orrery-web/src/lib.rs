//! Browser bindings for the museum kernel.
//!
//! The page calls `museum_init` once, pushes input as it arrives, then calls
//! `museum_tick` from `requestAnimationFrame` and reads the frame sections
//! straight out of wasm memory through the pointer getters.

use std::cell::RefCell;

use log::{error, info, warn};
use orrery_engine::{InputEvent, Museum};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::GameRunner;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<Museum>>> = RefCell::new(None);
}

/// Run `f` against the live runner. Returns `None` (and logs) when
/// `museum_init` has not succeeded yet.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner<Museum>) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                error!("museum not initialized; call museum_init() first");
                None
            }
        }
    })
}

/// Build the kernel from an optional scene JSON (defaults otherwise).
/// Returns false when the scene is malformed; the page should show an
/// error instead of starting the frame loop.
#[wasm_bindgen]
pub fn museum_init(scene_json: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let museum = match scene_json.as_deref().map(Museum::from_json) {
        None => Museum::new(),
        Some(Ok(museum)) => museum,
        Some(Err(e)) => {
            error!("scene rejected: {e}");
            return false;
        }
    };

    let mut runner = GameRunner::new(museum);
    if let Err(e) = runner.init() {
        error!("scene rejected: {e}");
        return false;
    }

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    info!("museum: initialized");
    true
}

#[wasm_bindgen]
pub fn museum_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

/// Click in normalized device coordinates (x right, y up, both in [-1, 1]).
#[wasm_bindgen]
pub fn museum_click(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::Click { x, y }));
}

#[wasm_bindgen]
pub fn museum_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn museum_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

/// Panel command; see `orrery_engine::museum::commands` for the kinds.
#[wasm_bindgen]
pub fn museum_command(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

// ---- Assets ----

#[wasm_bindgen]
pub fn museum_load_manifest(json: &str) -> u32 {
    with_runner(|r| match r.load_manifest(json) {
        Ok(count) => count as u32,
        Err(e) => {
            warn!("manifest rejected: {e}");
            0
        }
    })
    .unwrap_or(0)
}

#[wasm_bindgen]
pub fn museum_asset_loaded(name: &str) {
    with_runner(|r| r.asset_loaded(name));
}

#[wasm_bindgen]
pub fn museum_asset_failed(name: &str, reason: &str) {
    with_runner(|r| r.asset_failed(name, reason));
}

#[wasm_bindgen]
pub fn museum_media_blocked(name: &str, reason: &str) {
    with_runner(|r| r.media_blocked(name, reason));
}

#[wasm_bindgen]
pub fn museum_params_json() -> String {
    with_runner(|r| r.params_json()).unwrap_or_default()
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_bodies_ptr() -> *const f32 {
    with_runner(|r| r.bodies_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(|r| r.body_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_asteroids_ptr() -> *const f32 {
    with_runner(|r| r.asteroids_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_asteroid_count() -> u32 {
    with_runner(|r| r.asteroid_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_explosions_ptr() -> *const f32 {
    with_runner(|r| r.explosions_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_explosion_count() -> u32 {
    with_runner(|r| r.explosion_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_media_ptr() -> *const f32 {
    with_runner(|r| r.media_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_media_len() -> u32 {
    with_runner(|r| r.media_len()).unwrap_or(0)
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_bodies() -> u32 {
    with_runner(|r| r.max_bodies()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_asteroids() -> u32 {
    with_runner(|r| r.max_asteroids()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_explosions() -> u32 {
    with_runner(|r| r.max_explosions()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_media() -> u32 {
    with_runner(|r| r.max_media()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}
