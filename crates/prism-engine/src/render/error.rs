use crate::device::GpuError;
use crate::scene::TargetId;

/// Failures surfaced by a [`Renderer`](super::Renderer).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Surface or device became unusable; the frame loop cannot continue.
    #[error("GPU device lost: {0}")]
    DeviceLost(String),

    #[error("shader `{label}` failed to compile: {message}")]
    ShaderCompile { label: String, message: String },

    /// A `TextureRef::Target` or `RenderTargetBinding::Offscreen` names a target
    /// the renderer never allocated.
    #[error("offscreen target {0:?} is not allocated")]
    MissingTarget(TargetId),

    #[error("offscreen target size {width}x{height} exceeds the device limit {max}")]
    TargetTooLarge { width: u32, height: u32, max: u32 },

    #[error("renderer used in an invalid state: {0}")]
    InvalidState(&'static str),
}

impl From<GpuError> for RenderError {
    fn from(err: GpuError) -> Self {
        RenderError::DeviceLost(err.to_string())
    }
}
