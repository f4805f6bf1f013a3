use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::camera::Camera;
use crate::device::{Gpu, GpuFrame};
use crate::render::recording::BoundTarget;
use crate::render::{OffscreenTarget, RenderError, RenderTargetBinding, Renderer, TargetAllocator};
use crate::scene::{ColorSpace, Material, MeshId, Node, Scene, TargetId, TextureId, TextureRef};

use super::pipeline::{build_pipeline, Layouts, ProgramKey};
use super::resources::{create_sampler, GpuMesh, GpuTarget, GpuTexture, ScreenAttachments, TARGET_FORMAT};
use super::uniforms::{slot_stride, DrawUniforms, DRAW_UNIFORM_SIZE};

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Pipelines differ by program, color format and sample count.
type PipelineKey = (ProgramKey, wgpu::TextureFormat, u32);

/// Long-lived wgpu renderer state: caches, pipelines and offscreen targets.
///
/// Drawing happens through a per-frame [`FrameRenderer`] obtained from
/// [`GpuRenderer::begin`]; every pass of the frame records into the frame's
/// single command encoder.
pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    max_texture_dimension: u32,
    slot_stride: u64,
    /// MSAA samples for on-screen passes; offscreen targets use one.
    sample_count: u32,

    layouts: Layouts,
    sampler: wgpu::Sampler,
    fallback: GpuTexture,

    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    meshes: HashMap<MeshId, GpuMesh>,
    textures: HashMap<TextureId, GpuTexture>,
    targets: HashMap<TargetId, GpuTarget>,
    screen: Option<ScreenAttachments>,
    slots: Option<SlotBuffer>,

    auto_clear: bool,
    output_color_space: ColorSpace,

    lost: Arc<AtomicBool>,
}

/// Uniform buffer holding one [`DrawUniforms`] per draw of the current frame.
struct SlotBuffer {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    capacity: u32,
}

/// Where sampled group-1 bindings come from for one draw.
#[derive(Debug, Copy, Clone)]
enum Sampled {
    Image(TextureId),
    Target(TargetId),
    Fallback,
}

struct Draw {
    pipeline: PipelineKey,
    mesh: MeshId,
    sampled: Sampled,
    offset: u32,
}

#[derive(Debug, Copy, Clone, Default)]
struct PendingClear {
    color: bool,
    depth: bool,
}

impl PendingClear {
    fn any(self) -> bool {
        self.color || self.depth
    }
}

impl GpuRenderer {
    pub fn new(gpu: &Gpu<'_>) -> Self {
        let device = gpu.device().clone();
        let queue = gpu.queue().clone();

        let layouts = Layouts::new(&device);
        let sampler = create_sampler(&device);
        let fallback = GpuTexture::fallback(&device, &queue, &layouts.sampled, &sampler);
        let limits = device.limits();

        Self {
            max_texture_dimension: limits.max_texture_dimension_2d,
            slot_stride: slot_stride(limits.min_uniform_buffer_offset_alignment),
            sample_count: gpu.sample_count(),
            device,
            queue,
            layouts,
            sampler,
            fallback,
            pipelines: HashMap::new(),
            meshes: HashMap::new(),
            textures: HashMap::new(),
            targets: HashMap::new(),
            screen: None,
            slots: None,
            auto_clear: true,
            output_color_space: ColorSpace::Linear,
            lost: gpu.lost_flag(),
        }
    }

    /// Starts recording into `frame`. Call [`FrameRenderer::finish`] before
    /// submitting the frame so pending clears are flushed.
    pub fn begin<'r>(&'r mut self, frame: &'r mut GpuFrame) -> FrameRenderer<'r> {
        let size = frame.size();
        let screen_format = frame.format();
        self.ensure_screen(size, screen_format);

        FrameRenderer {
            renderer: self,
            encoder: &mut frame.encoder,
            screen_view: &frame.view,
            screen_format,
            bound: None,
            pending: PendingClear::default(),
            next_slot: 0,
        }
    }

    fn check_alive(&self) -> Result<(), RenderError> {
        if self.lost.load(Ordering::Acquire) {
            return Err(RenderError::DeviceLost("device reported lost".to_string()));
        }
        Ok(())
    }

    fn ensure_screen(&mut self, size: (u32, u32), format: wgpu::TextureFormat) {
        if self.screen.as_ref().is_some_and(|s| s.matches(size, format)) {
            return;
        }
        log::debug!("screen attachments {}x{} {format:?} x{}", size.0, size.1, self.sample_count);
        self.screen = Some(ScreenAttachments::new(&self.device, size, format, self.sample_count));
    }

    fn samples_for(&self, bound: BoundTarget) -> u32 {
        match bound {
            BoundTarget::Screen => self.sample_count,
            BoundTarget::Offscreen(_) => 1,
        }
    }

    fn ensure_slot_capacity(&mut self, required: u32) {
        if self.slots.as_ref().is_some_and(|s| s.capacity >= required) {
            return;
        }
        let capacity = required.next_power_of_two().max(16);
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism draw uniforms"),
            size: self.slot_stride * u64::from(capacity),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism draw bind group"),
            layout: &self.layouts.draw,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                }),
            }],
        });
        self.slots = Some(SlotBuffer { buffer, bind_group, capacity });
    }

    fn ensure_mesh(&mut self, node: &Node) {
        let id = node.mesh.id();
        if !self.meshes.contains_key(&id) {
            let mesh = GpuMesh::upload(&self.device, &node.name, node.mesh.data());
            self.meshes.insert(id, mesh);
        }
    }

    fn ensure_pipeline(&mut self, node: &Node, key: PipelineKey) -> Result<(), RenderError> {
        if !self.pipelines.contains_key(&key) {
            let (_, format, samples) = key;
            let pipeline = build_pipeline(&self.device, &self.layouts, &node.material, format, samples)?;
            self.pipelines.insert(key, pipeline);
        }
        Ok(())
    }

    /// Resolves what a node's material samples, uploading images on first use.
    fn ensure_sampled(
        &mut self,
        scene: &Scene,
        node: &Node,
        bound: BoundTarget,
    ) -> Result<Sampled, RenderError> {
        let texture_ref = match &node.material {
            Material::Basic(m) => m.map,
            Material::Shader(m) => m.uniforms.env_map,
        };

        match texture_ref {
            None => Ok(Sampled::Fallback),
            Some(TextureRef::Target(id)) => {
                if !self.targets.contains_key(&id) {
                    return Err(RenderError::MissingTarget(id));
                }
                if bound == BoundTarget::Offscreen(id) {
                    return Err(RenderError::InvalidState("target sampled while bound for drawing"));
                }
                Ok(Sampled::Target(id))
            }
            Some(TextureRef::Image(id)) => {
                let Some(texture) = scene.texture(id) else {
                    log::warn!("node `{}` references unknown texture {id:?}", node.name);
                    return Ok(Sampled::Fallback);
                };
                let stale = self
                    .textures
                    .get(&id)
                    .is_none_or(|t| t.color_space != texture.color_space);
                if stale {
                    let gpu = GpuTexture::upload(
                        &self.device,
                        &self.queue,
                        &self.layouts.sampled,
                        &self.sampler,
                        texture,
                    );
                    self.textures.insert(id, gpu);
                }
                Ok(Sampled::Image(id))
            }
        }
    }

    fn sampled_bind_group(&self, sampled: Sampled) -> &wgpu::BindGroup {
        let found = match sampled {
            Sampled::Image(id) => self.textures.get(&id).map(|t| &t.bind_group),
            Sampled::Target(id) => self.targets.get(&id).map(|t| &t.bind_group),
            Sampled::Fallback => None,
        };
        found.unwrap_or(&self.fallback.bind_group)
    }
}

impl TargetAllocator for GpuRenderer {
    fn max_target_dimension(&self) -> u32 {
        self.max_texture_dimension
    }

    fn allocate_target(&mut self, target: &OffscreenTarget) -> Result<(), RenderError> {
        self.check_alive()?;
        let (width, height) = target.size();
        let max = self.max_texture_dimension;
        if width > max || height > max {
            return Err(RenderError::TargetTooLarge { width, height, max });
        }

        let current = self.targets.get(&target.id());
        if current.is_some_and(|t| t.generation == target.generation() && t.size == target.size()) {
            return Ok(());
        }

        log::debug!("allocating offscreen target {:?} at {width}x{height}", target.id());
        let gpu_target = GpuTarget::allocate(
            &self.device,
            &self.layouts.sampled,
            &self.sampler,
            target.size(),
            target.generation(),
        );
        self.targets.insert(target.id(), gpu_target);
        Ok(())
    }
}

/// [`Renderer`] recording one frame into a [`GpuFrame`]'s encoder.
pub struct FrameRenderer<'r> {
    renderer: &'r mut GpuRenderer,
    encoder: &'r mut wgpu::CommandEncoder,
    screen_view: &'r wgpu::TextureView,
    screen_format: wgpu::TextureFormat,
    bound: Option<BoundTarget>,
    pending: PendingClear,
    next_slot: u32,
}

impl FrameRenderer<'_> {
    /// Flushes clears that no draw consumed. Must run before the frame is submitted.
    pub fn finish(mut self) -> Result<(), RenderError> {
        self.flush_pending()
    }

    fn bound(&self) -> Result<BoundTarget, RenderError> {
        self.bound.ok_or(RenderError::InvalidState("no render target bound"))
    }

    fn color_format(&self, bound: BoundTarget) -> wgpu::TextureFormat {
        match bound {
            BoundTarget::Screen => self.screen_format,
            BoundTarget::Offscreen(_) => TARGET_FORMAT,
        }
    }

    fn flush_pending(&mut self) -> Result<(), RenderError> {
        if !self.pending.any() {
            return Ok(());
        }
        let bound = self.bound()?;
        let pending = std::mem::take(&mut self.pending);
        let attachments = attachments(self.renderer, self.screen_view, bound)?;
        let _pass = begin_pass(self.encoder, attachments, pending);
        Ok(())
    }
}

impl TargetAllocator for FrameRenderer<'_> {
    fn max_target_dimension(&self) -> u32 {
        self.renderer.max_target_dimension()
    }

    fn allocate_target(&mut self, target: &OffscreenTarget) -> Result<(), RenderError> {
        self.renderer.allocate_target(target)
    }
}

impl Renderer for FrameRenderer<'_> {
    fn set_target(&mut self, target: RenderTargetBinding<'_>) -> Result<(), RenderError> {
        self.renderer.check_alive()?;
        if self.bound.is_some() {
            self.flush_pending()?;
        }
        let bound = match target {
            RenderTargetBinding::Screen => BoundTarget::Screen,
            RenderTargetBinding::Offscreen(t) => {
                if !self.renderer.targets.contains_key(&t.id()) {
                    return Err(RenderError::MissingTarget(t.id()));
                }
                // Reallocates only if the descriptor was resized since the last allocation.
                self.renderer.allocate_target(t)?;
                BoundTarget::Offscreen(t.id())
            }
        };
        self.bound = Some(bound);
        Ok(())
    }

    fn render(&mut self, scene: &Scene, camera: &dyn Camera) -> Result<(), RenderError> {
        self.renderer.check_alive()?;
        let bound = self.bound()?;
        if self.renderer.auto_clear {
            self.pending = PendingClear { color: true, depth: true };
        }

        let format = self.color_format(bound);
        let samples = self.renderer.samples_for(bound);
        let encode_srgb = bound == BoundTarget::Screen
            && self.renderer.output_color_space == ColorSpace::Srgb
            && !format.is_srgb();

        // Mutating preparation first; the pass below only borrows immutably.
        let nodes: Vec<&Node> = scene.visible_to(camera.layers()).map(|(_, n)| n).collect();
        self.renderer.ensure_slot_capacity(self.next_slot + nodes.len() as u32);

        let mut draws = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.renderer.ensure_mesh(node);
            let key = (ProgramKey::of(&node.material), format, samples);
            self.renderer.ensure_pipeline(node, key)?;
            let sampled = self.renderer.ensure_sampled(scene, node, bound)?;

            let offset = self.renderer.slot_stride * u64::from(self.next_slot);
            self.next_slot += 1;
            if let Some(slots) = self.renderer.slots.as_ref() {
                let uniforms = DrawUniforms::new(node, camera, encode_srgb);
                self.renderer.queue.write_buffer(&slots.buffer, offset, bytemuck::bytes_of(&uniforms));
            }

            draws.push(Draw {
                pipeline: key,
                mesh: node.mesh.id(),
                sampled,
                offset: offset as u32,
            });
        }

        let pending = std::mem::take(&mut self.pending);
        let renderer: &GpuRenderer = self.renderer;
        let Some(slots) = renderer.slots.as_ref() else {
            return Err(RenderError::InvalidState("draw uniform buffer missing"));
        };
        let attachments = attachments(renderer, self.screen_view, bound)?;
        let mut rpass = begin_pass(self.encoder, attachments, pending);

        for draw in &draws {
            let Some(pipeline) = renderer.pipelines.get(&draw.pipeline) else { continue };
            let Some(mesh) = renderer.meshes.get(&draw.mesh) else { continue };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &slots.bind_group, &[draw.offset]);
            rpass.set_bind_group(1, renderer.sampled_bind_group(draw.sampled), &[]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        self.bound()?;
        self.pending = PendingClear { color: true, depth: true };
        Ok(())
    }

    fn clear_depth(&mut self) -> Result<(), RenderError> {
        self.bound()?;
        self.pending.depth = true;
        Ok(())
    }

    fn auto_clear(&self) -> bool {
        self.renderer.auto_clear
    }

    fn set_auto_clear(&mut self, enabled: bool) {
        self.renderer.auto_clear = enabled;
    }

    fn output_color_space(&self) -> ColorSpace {
        self.renderer.output_color_space
    }

    fn set_output_color_space(&mut self, space: ColorSpace) {
        self.renderer.output_color_space = space;
    }
}

/// Views one pass draws into.
struct PassAttachments<'a> {
    color: &'a wgpu::TextureView,
    /// Swapchain view the multisampled color resolves into.
    resolve: Option<&'a wgpu::TextureView>,
    depth: &'a wgpu::TextureView,
}

fn attachments<'a>(
    renderer: &'a GpuRenderer,
    screen_view: &'a wgpu::TextureView,
    bound: BoundTarget,
) -> Result<PassAttachments<'a>, RenderError> {
    match bound {
        BoundTarget::Screen => {
            let screen = renderer
                .screen
                .as_ref()
                .ok_or(RenderError::InvalidState("screen attachments missing"))?;
            Ok(match &screen.msaa_view {
                Some(msaa) => PassAttachments { color: msaa, resolve: Some(screen_view), depth: &screen.depth.view },
                None => PassAttachments { color: screen_view, resolve: None, depth: &screen.depth.view },
            })
        }
        BoundTarget::Offscreen(id) => {
            let target = renderer.targets.get(&id).ok_or(RenderError::MissingTarget(id))?;
            Ok(PassAttachments { color: &target.color_view, resolve: None, depth: &target.depth.view })
        }
    }
}

fn begin_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    attachments: PassAttachments<'_>,
    pending: PendingClear,
) -> wgpu::RenderPass<'e> {
    let color_load = if pending.color {
        wgpu::LoadOp::Clear(CLEAR_COLOR)
    } else {
        wgpu::LoadOp::Load
    };
    let depth_load = if pending.depth {
        wgpu::LoadOp::Clear(1.0)
    } else {
        wgpu::LoadOp::Load
    };

    // The multisampled color is kept across passes; each pass re-resolves it.
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("prism pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: attachments.color,
            resolve_target: attachments.resolve,
            ops: wgpu::Operations {
                load: color_load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: attachments.depth,
            depth_ops: Some(wgpu::Operations {
                load: depth_load,
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}
