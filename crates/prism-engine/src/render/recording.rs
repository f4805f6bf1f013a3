use std::collections::HashMap;

use crate::camera::{Camera, CameraKind};
use crate::scene::{ColorSpace, Material, NodeId, Scene, TargetId, TextureRef};

use super::{OffscreenTarget, RenderError, RenderTargetBinding, Renderer, TargetAllocator};

/// Owned form of a [`RenderTargetBinding`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BoundTarget {
    Screen,
    Offscreen(TargetId),
}

/// One call made on a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    Allocate { target: TargetId, size: (u32, u32) },
    SetTarget(BoundTarget),
    Render { camera: CameraKind, nodes: Vec<NodeId> },
    Clear,
    ClearDepth,
}

/// GPU-free [`Renderer`] that logs every call.
///
/// Applies the same visibility rule and target checks as the wgpu renderer,
/// so pass logic can be verified without a device.
#[derive(Debug)]
pub struct RecordingRenderer {
    ops: Vec<RenderOp>,
    allocated: HashMap<TargetId, (u32, u32)>,
    bound: Option<BoundTarget>,
    auto_clear: bool,
    output_color_space: ColorSpace,
    max_target_dimension: u32,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            allocated: HashMap::new(),
            bound: None,
            auto_clear: true,
            output_color_space: ColorSpace::Linear,
            max_target_dimension: 8192,
        }
    }
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_target_dimension(mut self, max: u32) -> Self {
        self.max_target_dimension = max;
        self
    }

    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Returns and forgets the recorded calls.
    pub fn take_ops(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }

    /// Size the target was last allocated with.
    pub fn allocated_size(&self, id: TargetId) -> Option<(u32, u32)> {
        self.allocated.get(&id).copied()
    }

    pub fn bound(&self) -> Option<BoundTarget> {
        self.bound
    }

    fn check_sampled_targets<'s>(
        &self,
        nodes: impl Iterator<Item = &'s Material>,
    ) -> Result<(), RenderError> {
        for material in nodes {
            let Some(shader) = material.as_shader() else { continue };
            if let Some(TextureRef::Target(id)) = shader.uniforms.env_map {
                if !self.allocated.contains_key(&id) {
                    return Err(RenderError::MissingTarget(id));
                }
            }
        }
        Ok(())
    }
}

impl TargetAllocator for RecordingRenderer {
    fn max_target_dimension(&self) -> u32 {
        self.max_target_dimension
    }

    fn allocate_target(&mut self, target: &OffscreenTarget) -> Result<(), RenderError> {
        let (width, height) = target.size();
        let max = self.max_target_dimension;
        if width > max || height > max {
            return Err(RenderError::TargetTooLarge { width, height, max });
        }
        self.allocated.insert(target.id(), target.size());
        self.ops.push(RenderOp::Allocate { target: target.id(), size: target.size() });
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn set_target(&mut self, target: RenderTargetBinding<'_>) -> Result<(), RenderError> {
        let bound = match target {
            RenderTargetBinding::Screen => BoundTarget::Screen,
            RenderTargetBinding::Offscreen(t) => {
                match self.allocated.get(&t.id()).copied() {
                    None => return Err(RenderError::MissingTarget(t.id())),
                    Some(size) if size != t.size() => self.allocate_target(t)?,
                    Some(_) => {}
                }
                BoundTarget::Offscreen(t.id())
            }
        };
        self.bound = Some(bound);
        self.ops.push(RenderOp::SetTarget(bound));
        Ok(())
    }

    fn render(&mut self, scene: &Scene, camera: &dyn Camera) -> Result<(), RenderError> {
        if self.bound.is_none() {
            return Err(RenderError::InvalidState("render called with no target bound"));
        }
        self.check_sampled_targets(scene.visible_to(camera.layers()).map(|(_, n)| &n.material))?;

        if self.auto_clear {
            self.ops.push(RenderOp::Clear);
        }
        let nodes = scene.visible_to(camera.layers()).map(|(id, _)| id).collect();
        self.ops.push(RenderOp::Render { camera: camera.kind(), nodes });
        Ok(())
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        if self.bound.is_none() {
            return Err(RenderError::InvalidState("clear called with no target bound"));
        }
        self.ops.push(RenderOp::Clear);
        Ok(())
    }

    fn clear_depth(&mut self) -> Result<(), RenderError> {
        if self.bound.is_none() {
            return Err(RenderError::InvalidState("clear_depth called with no target bound"));
        }
        self.ops.push(RenderOp::ClearDepth);
        Ok(())
    }

    fn auto_clear(&self) -> bool {
        self.auto_clear
    }

    fn set_auto_clear(&mut self, enabled: bool) {
        self.auto_clear = enabled;
    }

    fn output_color_space(&self) -> ColorSpace {
        self.output_color_space
    }

    fn set_output_color_space(&mut self, space: ColorSpace) {
        self.output_color_space = space;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrthographicCamera;
    use crate::scene::{BasicMaterial, Layers, Mesh, Node};

    fn backdrop_scene() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let mut node = Node::new("bg", Mesh::plane(), Material::Basic(BasicMaterial::default()));
        node.layers = Layers::BACKGROUND;
        let id = scene.add(node);
        (scene, id)
    }

    #[test]
    fn records_drawn_nodes_per_camera() {
        let (scene, bg) = backdrop_scene();
        let mut cam = OrthographicCamera::centered(10.0, 10.0, 1.0, 100.0);
        cam.layers = Layers::BACKGROUND;

        let mut r = RecordingRenderer::new();
        r.set_auto_clear(false);
        r.set_target(RenderTargetBinding::Screen).unwrap();
        r.render(&scene, &cam).unwrap();

        assert_eq!(
            r.ops(),
            &[
                RenderOp::SetTarget(BoundTarget::Screen),
                RenderOp::Render { camera: CameraKind::Orthographic, nodes: vec![bg] },
            ]
        );
    }

    #[test]
    fn auto_clear_precedes_each_render() {
        let (scene, _) = backdrop_scene();
        let cam = OrthographicCamera::centered(10.0, 10.0, 1.0, 100.0);
        let mut r = RecordingRenderer::new();
        r.set_target(RenderTargetBinding::Screen).unwrap();
        r.render(&scene, &cam).unwrap();
        assert_eq!(r.ops()[1], RenderOp::Clear);
    }

    #[test]
    fn unallocated_target_is_rejected() {
        let target = OffscreenTarget::new(4, 4, 64).unwrap();
        let mut r = RecordingRenderer::new();
        let err = r.set_target(RenderTargetBinding::Offscreen(&target)).unwrap_err();
        assert!(matches!(err, RenderError::MissingTarget(id) if id == target.id()));
    }

    #[test]
    fn resized_target_is_reallocated_on_bind() {
        let mut target = OffscreenTarget::new(4, 4, 64).unwrap();
        let mut r = RecordingRenderer::new();
        r.allocate_target(&target).unwrap();
        target.set_size(8, 2);
        r.set_target(RenderTargetBinding::Offscreen(&target)).unwrap();
        assert_eq!(r.allocated_size(target.id()), Some((8, 2)));
    }

    #[test]
    fn drawing_without_target_is_invalid() {
        let (scene, _) = backdrop_scene();
        let cam = OrthographicCamera::centered(10.0, 10.0, 1.0, 100.0);
        let mut r = RecordingRenderer::new();
        assert!(matches!(r.render(&scene, &cam), Err(RenderError::InvalidState(_))));
        assert!(matches!(r.clear_depth(), Err(RenderError::InvalidState(_))));
    }
}
