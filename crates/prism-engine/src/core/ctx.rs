use glam::Vec2;
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::Gpu;
use crate::input::{InputFrame, InputState};
use crate::render::{FrameRenderer, GpuRenderer, RenderError};
use crate::scene::DefaultUniforms;
use crate::time::FrameTime;

use super::app::AppControl;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }

    /// Logical size plus device pixel ratio.
    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.logical_size();
        Viewport::new(w, h, self.window.scale_factor() as f32)
    }
}

/// Context for `App::init`.
pub struct InitCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a Gpu<'w>,
    pub viewport: Viewport,
}

/// Context for `App::on_resize`.
pub struct ResizeCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a Gpu<'w>,
    pub viewport: Viewport,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub viewport: Viewport,
    /// Host-managed shader uniforms for this frame.
    pub defaults: DefaultUniforms,
}

impl FrameCtx<'_, '_> {
    /// Acquires the surface frame, lets `draw` record every pass through a
    /// [`FrameRenderer`], then submits and presents once.
    ///
    /// Recoverable surface conditions skip the frame. A lost device or an
    /// out-of-memory surface is reported as [`RenderError::DeviceLost`].
    pub fn render<F>(&mut self, renderer: &mut GpuRenderer, draw: F) -> Result<AppControl, RenderError>
    where
        F: FnOnce(&mut FrameRenderer<'_>) -> Result<(), RenderError>,
    {
        let Some(mut frame) = self.gpu.acquire_frame()? else {
            return Ok(AppControl::Continue);
        };

        // FrameRenderer borrows the frame; finished before submit() takes it.
        {
            let mut frame_renderer = renderer.begin(&mut frame);
            draw(&mut frame_renderer)?;
            frame_renderer.finish()?;
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);
        Ok(AppControl::Continue)
    }
}

/// Builds the host uniforms: elapsed time, physical resolution and the pointer
/// in physical pixels (origin top-left, zero when the pointer is outside).
pub fn default_uniforms(time: &FrameTime, viewport: Viewport, input: &InputState) -> DefaultUniforms {
    let (w, h) = viewport.physical_size();
    let pointer = input
        .pointer_pos
        .map(|(x, y)| Vec2::new(x, y) * viewport.scale_factor)
        .unwrap_or(Vec2::ZERO);
    DefaultUniforms {
        time: time.elapsed,
        resolution: Vec2::new(w as f32, h as f32),
        pointer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn default_uniforms_are_physical() {
        let time = FrameTime { dt: 0.016, elapsed: 1.5, now: Instant::now(), frame_index: 3 };
        let mut input = InputState::default();
        input.pointer_pos = Some((10.0, 20.0));

        let u = default_uniforms(&time, Viewport::new(400.0, 300.0, 2.0), &input);
        assert_eq!(u.time, 1.5);
        assert_eq!(u.resolution, Vec2::new(800.0, 600.0));
        assert_eq!(u.pointer, Vec2::new(20.0, 40.0));
    }

    #[test]
    fn pointer_outside_reads_zero() {
        let time = FrameTime { dt: 0.016, elapsed: 0.0, now: Instant::now(), frame_index: 0 };
        let u = default_uniforms(&time, Viewport::new(10.0, 10.0, 1.0), &InputState::default());
        assert_eq!(u.pointer, Vec2::ZERO);
    }
}
