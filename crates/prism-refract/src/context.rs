use glam::Vec3;
use prism_engine::camera::{OrbitControls, OrthographicCamera, PerspectiveCamera};
use prism_engine::coords::Viewport;
use prism_engine::render::OffscreenTarget;
use prism_engine::scene::{Node, NodeId, Scene, TextureRef, UniformSlot, UniformValue};

use crate::lifecycle::Lifecycle;

/// Everything one refraction session owns: the scene with its two nodes, both
/// cameras, the orbit controller and the environment target.
///
/// Built by [`initialize`](crate::initialize); passed by reference to the
/// capture, composite and resize steps.
#[derive(Debug)]
pub struct RenderContext {
    pub scene: Scene,
    /// Backdrop camera; sees only `Layers::BACKGROUND`.
    pub ortho: OrthographicCamera,
    /// Model camera; sees only `Layers::DEFAULT`.
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    /// The single environment capture target. Resized in place.
    pub env_target: OffscreenTarget,
    pub quad: NodeId,
    pub model: NodeId,
    pub viewport: Viewport,
    pub backdrop_aspect: f32,
    /// Radians per second about +Y.
    pub angular_velocity: f32,
    pub(crate) lifecycle: Lifecycle,
}

impl RenderContext {
    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn quad_node(&self) -> Option<&Node> {
        self.scene.node(self.quad)
    }

    pub fn model_node(&self) -> Option<&Node> {
        self.scene.node(self.model)
    }

    /// Current model rotation about +Y, in `[0, 2π)`.
    pub fn model_rotation(&self) -> f32 {
        self.model_node().map_or(0.0, |n| n.transform.rotation.y)
    }

    /// The texture the refraction material samples.
    pub fn env_map(&self) -> Option<TextureRef> {
        let shader = self.model_node()?.material.as_shader()?;
        match shader.uniforms.get(UniformSlot::EnvMap) {
            UniformValue::Texture(t) => t,
            _ => None,
        }
    }

    /// Backdrop quad scale for a viewport `height` in logical pixels.
    pub fn backdrop_scale(&self, height: f32) -> Vec3 {
        Vec3::new(height * self.backdrop_aspect, height, 1.0)
    }

    /// Ends the session; no further frames or resizes are accepted.
    pub fn dispose(&mut self) {
        if self.lifecycle.transition(Lifecycle::Disposed).is_ok() {
            log::debug!("render context disposed");
        }
    }
}
