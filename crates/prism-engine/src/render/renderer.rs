use crate::camera::Camera;
use crate::scene::{ColorSpace, Scene};

use super::{OffscreenTarget, RenderError, RenderTargetBinding};

/// Creates GPU storage for offscreen targets.
///
/// Split from [`Renderer`] because targets are allocated during
/// initialization, before any frame is being recorded.
pub trait TargetAllocator {
    /// Largest edge, in pixels, of a target this allocator accepts.
    fn max_target_dimension(&self) -> u32;

    /// Allocates (or reallocates, after a resize) storage for `target`.
    fn allocate_target(&mut self, target: &OffscreenTarget) -> Result<(), RenderError>;
}

/// Draw interface used by the frame passes.
///
/// Calls are recorded in program order. With `auto_clear` off, the bound
/// target accumulates draws until [`Renderer::clear`] or
/// [`Renderer::clear_depth`] is called.
pub trait Renderer: TargetAllocator {
    /// Binds the destination of subsequent draws and clears.
    fn set_target(&mut self, target: RenderTargetBinding<'_>) -> Result<(), RenderError>;

    /// Draws every node of `scene` visible to `camera`, in scene order.
    fn render(&mut self, scene: &Scene, camera: &dyn Camera) -> Result<(), RenderError>;

    /// Clears color and depth of the bound target.
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Clears depth only; color is preserved.
    fn clear_depth(&mut self) -> Result<(), RenderError>;

    fn auto_clear(&self) -> bool;

    fn set_auto_clear(&mut self, enabled: bool);

    /// Encoding applied when writing to the screen.
    fn output_color_space(&self) -> ColorSpace;

    fn set_output_color_space(&mut self, space: ColorSpace);
}
