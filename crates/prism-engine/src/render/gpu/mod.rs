//! wgpu implementation of the [`Renderer`](super::Renderer) contract.
//!
//! Every material is compiled as `prelude.wgsl` + material body against one
//! pipeline layout: group 0 holds per-draw uniforms (dynamic offset), group 1
//! the sampled texture. Pipelines are built lazily per `(program, format,
//! samples)`; on-screen passes draw multisampled and resolve into the swapchain.

mod pipeline;
mod renderer;
mod resources;
mod uniforms;

pub use pipeline::{validate_material, SHADER_MATERIAL_PRELUDE};
pub use renderer::{FrameRenderer, GpuRenderer};
pub(crate) use resources::DEPTH_FORMAT;
