//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window events into `InputEvent`s.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
};
