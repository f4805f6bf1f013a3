use prism_engine::render::{RenderError, RenderTargetBinding, Renderer};

use crate::RenderContext;

/// Environment capture: draws the background layer through the orthographic
/// camera into the environment target. Nothing reaches the screen.
pub fn capture_environment(ctx: &RenderContext, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
    renderer.set_target(RenderTargetBinding::Offscreen(&ctx.env_target))?;
    // Auto clear is off; without this the target keeps last frame's depth.
    renderer.clear()?;
    renderer.render(&ctx.scene, &ctx.ortho)
}
