use glam::Vec2;
use prism_engine::coords::Viewport;
use prism_engine::render::TargetAllocator;

use crate::error::PrismError;
use crate::lifecycle::Lifecycle;
use crate::RenderContext;

/// Synchronizes the session with a new viewport, in one synchronous step:
///
/// - environment target resized in place to the physical size
/// - backdrop quad rescaled to `(H * aspect, H, 1)`
/// - orthographic bounds set to `(-W/2, W/2, H/2, -H/2)`
/// - perspective aspect updated
/// - refraction `resolution` uniform refreshed
///
/// Dimensions are clamped to at least one pixel.
pub fn resize(
    ctx: &mut RenderContext,
    allocator: &mut dyn TargetAllocator,
    viewport: Viewport,
) -> Result<(), PrismError> {
    ctx.lifecycle.transition(Lifecycle::Resizing)?;
    let result = apply(ctx, allocator, viewport.clamped());
    ctx.lifecycle.transition(Lifecycle::Ready)?;
    result
}

fn apply(
    ctx: &mut RenderContext,
    allocator: &mut dyn TargetAllocator,
    viewport: Viewport,
) -> Result<(), PrismError> {
    let (pw, ph) = viewport.physical_size();
    if ctx.env_target.set_size(pw, ph) {
        allocator.allocate_target(&ctx.env_target)?;
    }

    let (w, h) = (viewport.width, viewport.height);
    let scale = ctx.backdrop_scale(h);
    if let Some(quad) = ctx.scene.node_mut(ctx.quad) {
        quad.transform.scale = scale;
    }

    ctx.ortho.set_bounds(-w / 2.0, w / 2.0, h / 2.0, -h / 2.0);
    ctx.camera.set_aspect(viewport.aspect());

    if let Some(shader) = ctx.scene.node_mut(ctx.model).and_then(|n| n.material.as_shader_mut()) {
        shader.uniforms.resolution = Vec2::new(pw as f32, ph as f32);
    }

    ctx.viewport = viewport;
    log::debug!("resized to {w}x{h} @ {} (target {pw}x{ph})", viewport.scale_factor);
    Ok(())
}
