/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Mouse wheel delta.
///
/// `Line` corresponds to "scroll lines" style input; `Pixel` is high precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Logical pixels per wheel line when normalizing pixel deltas.
    pub const PIXELS_PER_LINE: f32 = 40.0;

    /// Delta expressed in lines (positive `y` = scroll up / away from user).
    pub fn in_lines(self) -> (f32, f32) {
        match self {
            Self::Line { x, y } => (x, y),
            Self::Pixel { x, y } => (x / Self::PIXELS_PER_LINE, y / Self::PIXELS_PER_LINE),
        }
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event, with the pointer position at the time of the press.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),
    MouseWheel(MouseWheelDelta),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}
