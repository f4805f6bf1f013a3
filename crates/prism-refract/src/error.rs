use prism_engine::assets::AssetError;
use prism_engine::render::RenderError;
use prism_engine::scene::MeshError;

use crate::config::ConfigError;
use crate::lifecycle::LifecycleError;

/// Startup failures. All are fatal: the frame loop never starts.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to load backdrop texture")]
    TextureLoad(#[source] AssetError),

    #[error("failed to load model")]
    ModelLoad(#[source] AssetError),

    #[error("model {0} has no node with geometry")]
    EmptyModel(String),

    #[error("model geometry is invalid")]
    InvalidMesh(#[from] MeshError),

    #[error("failed to allocate the environment target")]
    TargetAllocation(#[source] RenderError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Any error the refraction core reports.
#[derive(Debug, thiserror::Error)]
pub enum PrismError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<LifecycleError> for RenderError {
    fn from(err: LifecycleError) -> Self {
        log::error!("{err}");
        RenderError::InvalidState("render context is not ready")
    }
}
