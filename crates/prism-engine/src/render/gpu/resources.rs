use wgpu::util::DeviceExt;

use crate::scene::{ColorSpace, MeshData, Texture, Vertex};

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub(super) const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3, // normal
    2 => Float32x2  // uv
];

pub(super) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

pub(super) struct GpuMesh {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("prism {label} vbo")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("prism {label} ibo")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo, index_count: data.indices.len() as u32 }
    }
}

/// Sampled image texture with its group-1 bind group.
pub(super) struct GpuTexture {
    pub color_space: ColorSpace,
    pub bind_group: wgpu::BindGroup,
    _texture: wgpu::Texture,
}

impl GpuTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        texture: &Texture,
    ) -> Self {
        let (width, height) = texture.size();
        let format = match texture.color_space {
            ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            ColorSpace::Linear => wgpu::TextureFormat::Rgba8Unorm,
        };
        let gpu_texture = upload_rgba8(device, queue, "prism image texture", format, width, height, texture.pixels());
        let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            color_space: texture.color_space,
            bind_group: sample_bind_group(device, layout, sampler, &view, "prism image bind group"),
            _texture: gpu_texture,
        }
    }

    /// 1×1 white texture bound when a material has no map.
    pub fn fallback(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let texture = upload_rgba8(
            device,
            queue,
            "prism fallback texture",
            wgpu::TextureFormat::Rgba8Unorm,
            1,
            1,
            &[255; 4],
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            color_space: ColorSpace::Linear,
            bind_group: sample_bind_group(device, layout, sampler, &view, "prism fallback bind group"),
            _texture: texture,
        }
    }
}

/// Depth buffer sized to a color attachment.
pub(super) struct DepthBuffer {
    pub view: wgpu::TextureView,
}

impl DepthBuffer {
    pub fn new(device: &wgpu::Device, label: &str, size: (u32, u32), sample_count: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent(size),
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Self { view: texture.create_view(&wgpu::TextureViewDescriptor::default()) }
    }
}

/// Multisampled color + depth drawn by on-screen passes, resolved into the
/// swapchain image.
pub(super) struct ScreenAttachments {
    pub size: (u32, u32),
    pub format: wgpu::TextureFormat,
    /// `None` at one sample: passes draw straight into the swapchain view.
    pub msaa_view: Option<wgpu::TextureView>,
    pub depth: DepthBuffer,
}

impl ScreenAttachments {
    pub fn new(device: &wgpu::Device, size: (u32, u32), format: wgpu::TextureFormat, sample_count: u32) -> Self {
        let msaa_view = (sample_count > 1).then(|| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("prism screen msaa color"),
                    size: extent(size),
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });
        Self {
            size,
            format,
            msaa_view,
            depth: DepthBuffer::new(device, "prism screen depth", size, sample_count),
        }
    }

    pub fn matches(&self, size: (u32, u32), format: wgpu::TextureFormat) -> bool {
        self.size == size && self.format == format
    }
}

/// GPU storage behind an `OffscreenTarget`: color (render + sample) and depth.
pub(super) struct GpuTarget {
    pub generation: u64,
    pub size: (u32, u32),
    pub color_view: wgpu::TextureView,
    pub depth: DepthBuffer,
    /// Samples `color_view`; rebuilt with every reallocation.
    pub bind_group: wgpu::BindGroup,
}

impl GpuTarget {
    pub fn allocate(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        size: (u32, u32),
        generation: u64,
    ) -> Self {
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism offscreen color"),
            size: extent(size),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = sample_bind_group(device, layout, sampler, &color_view, "prism offscreen bind group");
        Self {
            generation,
            size,
            color_view,
            depth: DepthBuffer::new(device, "prism offscreen depth", size, 1),
            bind_group,
        }
    }
}

pub(super) fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("prism linear sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

fn sample_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    view: &wgpu::TextureView,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn upload_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> wgpu::Texture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: extent((width, height)),
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        extent((width, height)),
    );
    texture
}

fn extent((width, height): (u32, u32)) -> wgpu::Extent3d {
    wgpu::Extent3d { width, height, depth_or_array_layers: 1 }
}
