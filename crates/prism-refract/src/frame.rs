use prism_engine::input::{InputFrame, InputState};
use prism_engine::render::{RenderError, Renderer};
use prism_engine::scene::{ColorSpace, DefaultUniforms};

use crate::capture::capture_environment;
use crate::composite::composite;
use crate::RenderContext;

/// Per-frame host inputs.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Seconds since the previous frame.
    pub dt: f32,
    pub defaults: DefaultUniforms,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
}

/// Renderer state the two passes rely on: manual clears, sRGB screen output.
pub fn configure_renderer(renderer: &mut dyn Renderer) {
    if renderer.auto_clear() {
        renderer.set_auto_clear(false);
    }
    if renderer.output_color_space() != ColorSpace::Srgb {
        renderer.set_output_color_space(ColorSpace::Srgb);
    }
}

/// One frame: controls, uniform refresh, environment capture, composite.
///
/// The capture always precedes the composite, so the model samples the
/// background rendered this frame.
pub fn run_frame(
    ctx: &mut RenderContext,
    renderer: &mut dyn Renderer,
    frame: FrameInput<'_>,
) -> Result<(), RenderError> {
    ctx.lifecycle.ensure_ready()?;
    configure_renderer(renderer);

    ctx.controls
        .update(&mut ctx.camera, frame.input, frame.input_frame, ctx.viewport.height, frame.dt);

    if let Some(shader) = ctx.scene.node_mut(ctx.model).and_then(|n| n.material.as_shader_mut()) {
        shader.uniforms.apply_defaults(frame.defaults);
    }

    capture_environment(ctx, renderer)?;
    composite(ctx, renderer, frame.dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use prism_engine::camera::CameraKind;
    use prism_engine::render::{BoundTarget, RecordingRenderer, RenderOp};

    use crate::testing::ready_context;
    use crate::Lifecycle;

    fn run(ctx: &mut RenderContext, r: &mut RecordingRenderer, defaults: DefaultUniforms) -> Result<(), RenderError> {
        let input = InputState::default();
        let input_frame = InputFrame::default();
        run_frame(
            ctx,
            r,
            FrameInput { dt: 0.016, defaults, input: &input, input_frame: &input_frame },
        )
    }

    #[test]
    fn configure_disables_auto_clear_and_encodes_srgb() {
        let mut r = RecordingRenderer::new();
        configure_renderer(&mut r);
        assert!(!r.auto_clear());
        assert_eq!(r.output_color_space(), ColorSpace::Srgb);
    }

    #[test]
    fn capture_precedes_composite() {
        let mut r = RecordingRenderer::new();
        let mut ctx = ready_context(&mut r);
        r.take_ops();

        run(&mut ctx, &mut r, DefaultUniforms::default()).unwrap();

        let draws: Vec<_> = r.take_ops().into_iter().filter(|op| *op != RenderOp::Clear).collect();
        assert_eq!(
            draws,
            vec![
                RenderOp::SetTarget(BoundTarget::Offscreen(ctx.env_target.id())),
                RenderOp::Render { camera: CameraKind::Orthographic, nodes: vec![ctx.quad] },
                RenderOp::SetTarget(BoundTarget::Screen),
                RenderOp::Render { camera: CameraKind::Orthographic, nodes: vec![ctx.quad] },
                RenderOp::ClearDepth,
                RenderOp::Render { camera: CameraKind::Perspective, nodes: vec![ctx.model] },
            ]
        );
    }

    #[test]
    fn cameras_never_see_each_others_layer() {
        let mut r = RecordingRenderer::new();
        let mut ctx = ready_context(&mut r);

        for _ in 0..3 {
            run(&mut ctx, &mut r, DefaultUniforms::default()).unwrap();
        }

        for op in r.ops() {
            if let RenderOp::Render { camera, nodes } = op {
                match camera {
                    CameraKind::Orthographic => assert_eq!(nodes, &vec![ctx.quad]),
                    CameraKind::Perspective => assert_eq!(nodes, &vec![ctx.model]),
                }
            }
        }
    }

    #[test]
    fn one_depth_clear_between_screen_draws() {
        let mut r = RecordingRenderer::new();
        let mut ctx = ready_context(&mut r);
        r.take_ops();

        run(&mut ctx, &mut r, DefaultUniforms::default()).unwrap();

        let ops = r.take_ops();
        let screen = ops
            .iter()
            .position(|op| *op == RenderOp::SetTarget(BoundTarget::Screen))
            .unwrap();
        let perspective = ops
            .iter()
            .position(|op| matches!(op, RenderOp::Render { camera: CameraKind::Perspective, .. }))
            .unwrap();

        let between = &ops[screen..perspective];
        assert_eq!(between.iter().filter(|op| **op == RenderOp::ClearDepth).count(), 1);
        assert_eq!(between.iter().filter(|op| **op == RenderOp::Clear).count(), 1);
        assert_eq!(ops.iter().filter(|op| **op == RenderOp::ClearDepth).count(), 1);
    }

    #[test]
    fn frame_refreshes_defaults_but_keeps_env_map() {
        let mut r = RecordingRenderer::new();
        let mut ctx = ready_context(&mut r);
        let env = ctx.env_map();

        let defaults = DefaultUniforms {
            time: 3.5,
            resolution: Vec2::new(1600.0, 1200.0),
            pointer: Vec2::new(12.0, 34.0),
        };
        run(&mut ctx, &mut r, defaults).unwrap();

        let uniforms = ctx.model_node().unwrap().material.as_shader().unwrap().uniforms;
        assert_eq!(uniforms.time, 3.5);
        assert_eq!(uniforms.pointer, Vec2::new(12.0, 34.0));
        assert_eq!(ctx.env_map(), env);
    }

    #[test]
    fn frames_require_ready() {
        let mut r = RecordingRenderer::new();
        let mut ctx = ready_context(&mut r);
        ctx.dispose();
        r.take_ops();

        let err = run(&mut ctx, &mut r, DefaultUniforms::default()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidState(_)));
        assert!(r.ops().is_empty());
        assert_eq!(ctx.lifecycle(), Lifecycle::Disposed);
    }
}
