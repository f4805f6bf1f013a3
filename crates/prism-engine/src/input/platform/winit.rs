use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitButton, MouseScrollDelta, WindowEvent};

use crate::input::{
    InputEvent, InputState, MouseButton, MouseButtonState, MouseWheelDelta, PointerButtonEvent,
    PointerMoveEvent,
};

/// Maps the window events the orbit controller consumes onto [`InputEvent`]s.
///
/// Positions are converted to logical pixels with `scale_factor`. Button
/// events carry the last known pointer position from `state`.
pub(crate) fn translate_window_event(
    scale_factor: f64,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical(*position, scale_factor);
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
        }
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::MouseInput { state: pressed, button, .. } => {
            let (x, y) = state.pointer_pos.unwrap_or_default();
            InputEvent::PointerButton(PointerButtonEvent {
                button: button_of(*button),
                state: button_state(*pressed),
                x,
                y,
            })
        }
        WindowEvent::MouseWheel { delta, .. } => InputEvent::MouseWheel(wheel_delta(*delta, scale_factor)),
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        _ => return None,
    };
    Some(ev)
}

fn logical(pos: PhysicalPosition<f64>, scale_factor: f64) -> (f32, f32) {
    let pos = pos.to_logical::<f64>(scale_factor);
    (pos.x as f32, pos.y as f32)
}

fn wheel_delta(delta: MouseScrollDelta, scale_factor: f64) -> MouseWheelDelta {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x, y },
        MouseScrollDelta::PixelDelta(p) => {
            let (x, y) = logical(p, scale_factor);
            MouseWheelDelta::Pixel { x, y }
        }
    }
}

fn button_state(state: ElementState) -> MouseButtonState {
    if state.is_pressed() {
        MouseButtonState::Pressed
    } else {
        MouseButtonState::Released
    }
}

fn button_of(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Back,
        WinitButton::Forward => MouseButton::Forward,
        WinitButton::Other(v) => MouseButton::Other(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_logical() {
        assert_eq!(logical(PhysicalPosition::new(200.0, 100.0), 2.0), (100.0, 50.0));
    }

    #[test]
    fn pixel_wheel_is_scaled_line_wheel_is_not() {
        let px = wheel_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0)), 2.0);
        assert_eq!(px, MouseWheelDelta::Pixel { x: 0.0, y: 40.0 });

        let lines = wheel_delta(MouseScrollDelta::LineDelta(0.0, -1.0), 2.0);
        assert_eq!(lines, MouseWheelDelta::Line { x: 0.0, y: -1.0 });
    }

    #[test]
    fn element_state_maps_to_button_state() {
        assert_eq!(button_state(ElementState::Pressed), MouseButtonState::Pressed);
        assert_eq!(button_state(ElementState::Released), MouseButtonState::Released);
        assert_eq!(button_of(WinitButton::Other(7)), MouseButton::Other(7));
    }
}
