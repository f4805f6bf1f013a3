//! Asset loading.
//!
//! [`AssetLoader`] is the async seam initialization awaits on; [`FsAssetLoader`]
//! resolves paths on disk with `image` (PNG/JPEG) and `gltf` (glTF/GLB).

mod error;
mod fs;
mod loader;

pub use error::AssetError;
pub use fs::FsAssetLoader;
pub use loader::{AssetLoader, ModelAsset, ModelNode};
