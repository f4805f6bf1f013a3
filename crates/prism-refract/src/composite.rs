use std::f32::consts::TAU;

use prism_engine::render::{RenderError, RenderTargetBinding, Renderer};

use crate::RenderContext;

/// Composite: backdrop to screen, depth reset, spin, then the model.
///
/// The depth clear between the two draws keeps the backdrop's depth from
/// occluding the model while its color stays as the visible background.
pub fn composite(ctx: &mut RenderContext, renderer: &mut dyn Renderer, dt: f32) -> Result<(), RenderError> {
    renderer.set_target(RenderTargetBinding::Screen)?;
    renderer.clear()?;
    renderer.render(&ctx.scene, &ctx.ortho)?;
    renderer.clear_depth()?;

    advance_rotation(ctx, dt);

    renderer.render(&ctx.scene, &ctx.camera)
}

/// Spins the model about +Y by `angular_velocity * dt`, wrapped to `[0, 2π)`.
pub fn advance_rotation(ctx: &mut RenderContext, dt: f32) {
    let step = ctx.angular_velocity * dt;
    if let Some(node) = ctx.scene.node_mut(ctx.model) {
        let y = &mut node.transform.rotation.y;
        *y = (*y + step).rem_euclid(TAU);
        // A tiny negative step rounds up to exactly TAU in f32.
        if *y >= TAU {
            *y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use prism_engine::camera::CameraKind;
    use prism_engine::render::{BoundTarget, RecordingRenderer, RenderOp};

    use crate::testing::ready_context;

    #[test]
    fn backdrop_then_depth_reset_then_model() {
        let mut r = RecordingRenderer::new();
        let mut ctx = ready_context(&mut r);
        r.set_auto_clear(false);
        r.take_ops();

        composite(&mut ctx, &mut r, 0.0).unwrap();

        assert_eq!(
            r.ops(),
            &[
                RenderOp::SetTarget(BoundTarget::Screen),
                RenderOp::Clear,
                RenderOp::Render { camera: CameraKind::Orthographic, nodes: vec![ctx.quad] },
                RenderOp::ClearDepth,
                RenderOp::Render { camera: CameraKind::Perspective, nodes: vec![ctx.model] },
            ]
        );
    }

    #[test]
    fn rotation_accumulates_modulo_tau() {
        let mut r = RecordingRenderer::new();
        let mut ctx = ready_context(&mut r);
        ctx.angular_velocity = 1.0;

        let steps = [0.5_f32, 1.25, 2.0, 3.0, 0.016];
        for dt in steps {
            advance_rotation(&mut ctx, dt);
        }

        let expected = steps.iter().sum::<f32>().rem_euclid(TAU);
        let y = ctx.model_rotation();
        assert!((0.0..TAU).contains(&y));
        assert!((y - expected).abs() < 1e-4, "{y} vs {expected}");
    }

    #[test]
    fn tiny_reverse_step_stays_below_tau() {
        let mut r = RecordingRenderer::new();
        let mut ctx = ready_context(&mut r);
        ctx.angular_velocity = -1.0;

        advance_rotation(&mut ctx, 1e-8);

        let y = ctx.model_rotation();
        assert!((0.0..TAU).contains(&y), "{y} escaped [0, TAU)");
    }

    #[test]
    fn rotation_only_touches_y() {
        let mut r = RecordingRenderer::new();
        let mut ctx = ready_context(&mut r);
        let before = ctx.model_node().unwrap().transform;

        advance_rotation(&mut ctx, 0.25);

        let after = ctx.model_node().unwrap().transform;
        assert_eq!(after.position, before.position);
        assert_eq!(after.rotation.x, before.rotation.x);
        assert_eq!(after.rotation.z, before.rotation.z);
        assert_eq!(after.scale, before.scale);
        assert!((after.rotation.y - 0.25).abs() < 1e-6);
        assert_eq!(ctx.quad_node().unwrap().transform.rotation, Vec3::ZERO);
    }
}
