/// Input events delivered by the host page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click at normalized device coordinates (x right, y up, in [-1, 1]).
    Click { x: f32, y: f32 },
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A command from the debug panel or page buttons.
    /// `kind` identifies the command; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop pending events, keeping the allocation.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// DOM key codes the kernel reacts to.
pub mod keys {
    pub const SHIFT: u32 = 16;
    pub const SPACE: u32 = 32;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const G: u32 = 71;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
}

/// Which keys are currently held, built from KeyDown/KeyUp pairs.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: Vec<u32>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from one event. Returns true if this was a fresh press
    /// (not an auto-repeat of a held key).
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::KeyDown { key_code } => {
                if self.held.contains(&key_code) {
                    false
                } else {
                    self.held.push(key_code);
                    true
                }
            }
            InputEvent::KeyUp { key_code } => {
                self.held.retain(|&k| k != key_code);
                false
            }
            _ => false,
        }
    }

    pub fn is_down(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    /// +1 if only `positive` is held, -1 if only `negative`, else 0.
    pub fn axis(&self, positive: u32, negative: u32) -> f32 {
        let mut v = 0.0;
        if self.is_down(positive) {
            v += 1.0;
        }
        if self.is_down(negative) {
            v -= 1.0;
        }
        v
    }
}
