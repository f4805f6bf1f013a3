use std::collections::HashSet;

use super::types::{InputEvent, MouseButton};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held buttons, pointer position).
/// `InputFrame` provides events and transitions for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,

    /// Accumulated pointer motion this frame, logical pixels.
    pub pointer_delta: (f32, f32),

    /// Accumulated wheel motion this frame, in lines.
    pub wheel: (f32, f32),
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.pointer_delta = (0.0, 0.0);
        self.wheel = (0.0, 0.0);
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
