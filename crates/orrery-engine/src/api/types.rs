use bytemuck::{Pod, Zeroable};

/// A game event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// An asteroid was destroyed. `a` = belt index, `b` = asteroids left in that belt.
    pub const ASTEROID_DESTROYED: f32 = 1.0;
    /// A camera transition began. `a` = transition code, `b` = duration in ms.
    pub const TRANSITION_STARTED: f32 = 2.0;
    /// A camera transition finished. `a` = transition code.
    pub const TRANSITION_FINISHED: f32 = 3.0;
    /// The door finished swinging open.
    pub const DOOR_OPENED: f32 = 4.0;
    /// Ship mode changed. `a` = 1 when entering, 0 when leaving.
    pub const SHIP_MODE: f32 = 5.0;
    /// The ship bumped into a planet. `a` = planet index.
    pub const SHIP_BLOCKED: f32 = 6.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Playback request forwarded to the host's audio/video elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCommand {
    PlayMusic,
    PauseMusic,
    /// Index into the configured video panels.
    PlayVideo(usize),
    PauseVideo(usize),
}

impl MediaCommand {
    pub const FLOATS: usize = 2;

    /// Wire form: `[kind, panel]`; panel is -1 for music commands.
    pub fn to_floats(self) -> [f32; 2] {
        match self {
            MediaCommand::PlayMusic => [1.0, -1.0],
            MediaCommand::PauseMusic => [2.0, -1.0],
            MediaCommand::PlayVideo(panel) => [3.0, panel as f32],
            MediaCommand::PauseVideo(panel) => [4.0, panel as f32],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
        let e = GameEvent::new(GameEvent::DOOR_OPENED, 0.0, 0.0, 0.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&e));
        assert_eq!(floats, &[4.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn media_wire_form() {
        assert_eq!(MediaCommand::PlayMusic.to_floats(), [1.0, -1.0]);
        assert_eq!(MediaCommand::PauseVideo(1).to_floats(), [4.0, 1.0]);
    }
}
