use std::path::PathBuf;

use crate::scene::{MeshError, TextureError};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to decode image {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to import model {path}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("model {0} has no default scene")]
    NoScene(PathBuf),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("invalid mesh in node `{node}`")]
    Mesh {
        node: String,
        #[source]
        source: MeshError,
    },

    /// Resource not known to an in-memory loader.
    #[error("asset not found: {0}")]
    NotFound(String),
}
