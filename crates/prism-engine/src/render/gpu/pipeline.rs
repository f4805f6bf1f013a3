use crate::render::RenderError;
use crate::scene::{Material, ShaderId};

use super::resources::{vertex_layout, DEPTH_FORMAT};
use super::uniforms::DRAW_UNIFORM_SIZE;

/// Bindings every material source is compiled against.
pub const SHADER_MATERIAL_PRELUDE: &str = include_str!("../shaders/prelude.wgsl");

const BASIC_SHADER: &str = include_str!("../shaders/basic.wgsl");

/// Which WGSL program a pipeline runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(super) enum ProgramKey {
    Basic,
    Shader(ShaderId),
}

impl ProgramKey {
    pub fn of(material: &Material) -> Self {
        match material {
            Material::Basic(_) => Self::Basic,
            Material::Shader(m) => Self::Shader(m.program.id()),
        }
    }
}

/// Bind group layouts shared by every material pipeline.
pub(super) struct Layouts {
    pub draw: wgpu::BindGroupLayout,
    pub sampled: wgpu::BindGroupLayout,
    pipeline: wgpu::PipelineLayout,
}

impl Layouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let draw = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism draw bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let sampled = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism sampled texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism material pipeline layout"),
            bind_group_layouts: &[&draw, &sampled],
            immediate_size: 0,
        });

        Self { draw, sampled, pipeline }
    }
}

/// Full WGSL source for a material: prelude followed by the material program.
pub(super) fn material_source(material: &Material) -> (String, String) {
    let (label, body): (&str, &str) = match material {
        Material::Basic(_) => ("basic", BASIC_SHADER),
        Material::Shader(m) => (m.program.label, &*m.program.source),
    };
    (format!("{SHADER_MATERIAL_PRELUDE}\n{body}"), label.to_string())
}

/// Parses and validates WGSL on the CPU so a bad program surfaces as
/// [`RenderError::ShaderCompile`] instead of a device validation error.
pub(super) fn validate_wgsl(label: &str, source: &str) -> Result<(), RenderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| RenderError::ShaderCompile {
        label: label.to_string(),
        message: e.emit_to_string(source),
    })?;
    naga::valid::Validator::new(naga::valid::ValidationFlags::all(), naga::valid::Capabilities::all())
        .validate(&module)
        .map_err(|e| RenderError::ShaderCompile {
            label: label.to_string(),
            message: e.emit_to_string(source),
        })?;
    Ok(())
}

/// Checks that `material` compiles against the shared prelude without
/// touching a device.
pub fn validate_material(material: &Material) -> Result<(), RenderError> {
    let (source, label) = material_source(material);
    validate_wgsl(&label, &source)
}

pub(super) fn build_pipeline(
    device: &wgpu::Device,
    layouts: &Layouts,
    material: &Material,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
) -> Result<wgpu::RenderPipeline, RenderError> {
    let (source, label) = material_source(material);
    validate_wgsl(&label, &source)?;
    log::debug!("building pipeline `{label}` for {color_format:?} x{sample_count}");

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("prism {label} pipeline")),
        layout: Some(&layouts.pipeline),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[vertex_layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },

        multiview_mask: None,
        cache: None,
    }))
}
