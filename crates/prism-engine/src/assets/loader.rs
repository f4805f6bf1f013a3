use std::future::Future;

use crate::scene::{MeshData, Texture, Transform};

use super::AssetError;

/// One top-level node of a loaded model, with its subtree's geometry merged.
#[derive(Debug, Clone)]
pub struct ModelNode {
    pub name: String,
    pub transform: Transform,
    /// `None` for nodes whose subtree holds no triangles.
    pub mesh: Option<MeshData>,
}

/// A loaded model: the root nodes of its default scene, in file order.
#[derive(Debug, Clone, Default)]
pub struct ModelAsset {
    pub children: Vec<ModelNode>,
}

impl ModelAsset {
    /// First root node that carries geometry.
    pub fn first_mesh_child(&self) -> Option<&ModelNode> {
        self.children.iter().find(|c| c.mesh.is_some())
    }
}

/// Async source of textures and models.
///
/// Each call yields exactly one result; there is no progress streaming,
/// cancellation or retry.
pub trait AssetLoader {
    fn load_texture(&self, path: &str) -> impl Future<Output = Result<Texture, AssetError>>;

    fn load_model(&self, path: &str) -> impl Future<Output = Result<ModelAsset, AssetError>>;
}
