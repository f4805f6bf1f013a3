use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::{FrameCtx, InitCtx, ResizeCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Call order: `init` once (blocking; the frame loop starts only after it
/// returns `Ok`), then `on_frame` per redraw and `on_resize` whenever the
/// drawable size or scale factor changes. Errors are fatal to the runtime.
pub trait App {
    /// Called once after the window and GPU exist, before the first frame.
    fn init(&mut self, ctx: &mut InitCtx<'_, '_>) -> anyhow::Result<()>;

    /// Called synchronously when the viewport changes.
    fn on_resize(&mut self, ctx: &mut ResizeCtx<'_, '_>) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl>;
}
