use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

/// Current input state for the window.
///
/// Holds "is down" information and the current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck buttons when focus changes mid-drag.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let Some((px, py)) = self.pointer_pos {
                    frame.pointer_delta.0 += x - px;
                    frame.pointer_delta.1 += y - py;
                }
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel(delta) => {
                let (x, y) = delta.in_lines();
                frame.wheel.0 += x;
                frame.wheel.1 += y;
            }
        }

        frame.push_event(ev);
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    #[test]
    fn pointer_delta_accumulates_within_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, moved(10.0, 10.0));
        state.apply_event(&mut frame, moved(15.0, 8.0));
        state.apply_event(&mut frame, moved(20.0, 4.0));
        assert_eq!(frame.pointer_delta, (10.0, -6.0));
        assert_eq!(state.pointer_pos, Some((20.0, 4.0)));
    }

    #[test]
    fn first_move_produces_no_delta() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, moved(100.0, 50.0));
        assert_eq!(frame.pointer_delta, (0.0, 0.0));
    }

    #[test]
    fn button_transitions_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let press = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 0.0,
            y: 0.0,
        });
        state.apply_event(&mut frame, press.clone());
        state.apply_event(&mut frame, press);
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(frame.buttons_pressed.len(), 1);
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn focus_loss_releases_buttons() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.buttons_down.insert(MouseButton::Right);
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.button_down(MouseButton::Right));
    }

    #[test]
    fn wheel_pixels_normalized_to_lines() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }));
        state.apply_event(&mut frame, InputEvent::MouseWheel(MouseWheelDelta::Pixel { x: 0.0, y: 80.0 }));
        assert_eq!(frame.wheel, (0.0, 3.0));
    }

    #[test]
    fn clear_resets_frame_deltas() {
        let mut frame = InputFrame::default();
        frame.pointer_delta = (3.0, 4.0);
        frame.wheel = (1.0, 1.0);
        frame.buttons_pressed.insert(MouseButton::Left);
        frame.clear();
        assert_eq!(frame.pointer_delta, (0.0, 0.0));
        assert_eq!(frame.wheel, (0.0, 0.0));
        assert!(frame.buttons_pressed.is_empty());
    }
}
