//! Rendering subsystem.
//!
//! [`Renderer`] is the draw contract frame passes are written against.
//! [`GpuRenderer`]/[`FrameRenderer`] implement it on wgpu; [`RecordingRenderer`]
//! implements it without a GPU for tests and tooling.
//!
//! Conventions:
//! - clip-space depth in `[0, 1]`, depth cleared to 1.0, `LessEqual` test
//! - offscreen targets are `Rgba8UnormSrgb` with their own depth buffer
//! - the screen is drawn multisampled and resolved at the end of each pass
//! - with `auto_clear` off, clears are deferred and folded into the load op
//!   of the next pass on the bound target

mod error;
mod gpu;
mod recording;
mod renderer;
mod target;

pub use error::RenderError;
pub use gpu::{validate_material, FrameRenderer, GpuRenderer, SHADER_MATERIAL_PRELUDE};
pub(crate) use gpu::DEPTH_FORMAT;
pub use recording::{BoundTarget, RecordingRenderer, RenderOp};
pub use renderer::{Renderer, TargetAllocator};
pub use target::{OffscreenTarget, RenderTargetBinding};
