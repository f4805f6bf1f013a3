//! In-memory assets for exercising the pipeline without a disk or GPU.

use glam::Vec3;
use prism_engine::assets::{AssetError, AssetLoader, ModelAsset, ModelNode};
use prism_engine::coords::Viewport;
use prism_engine::render::RecordingRenderer;
use prism_engine::scene::{DefaultUniforms, MeshData, Texture, Transform};

use crate::{initialize, RenderContext, SceneConfig};

/// Serves a 1×1 texture and a model whose first root node is empty.
#[derive(Debug, Clone)]
pub(crate) struct FixtureAssets {
    pub model: ModelAsset,
    pub fail_texture: bool,
    pub fail_model: bool,
}

impl FixtureAssets {
    pub fn new() -> Self {
        let empty = ModelNode {
            name: "Empty".into(),
            transform: Transform::default(),
            mesh: None,
        };
        let gem = ModelNode {
            name: "Gem".into(),
            transform: Transform::from_position(Vec3::new(0.0, 0.5, 0.0)),
            mesh: Some(MeshData::plane()),
        };
        Self {
            model: ModelAsset { children: vec![empty, gem] },
            fail_texture: false,
            fail_model: false,
        }
    }
}

impl AssetLoader for FixtureAssets {
    async fn load_texture(&self, path: &str) -> Result<Texture, AssetError> {
        if self.fail_texture {
            return Err(AssetError::NotFound(path.to_owned()));
        }
        Ok(Texture::solid(1, 1, [40, 120, 60, 255])?)
    }

    async fn load_model(&self, path: &str) -> Result<ModelAsset, AssetError> {
        if self.fail_model {
            return Err(AssetError::NotFound(path.to_owned()));
        }
        Ok(self.model.clone())
    }
}

/// Initializes a session against a [`RecordingRenderer`] at 800×600 logical, ×2.
pub(crate) fn ready_context(renderer: &mut RecordingRenderer) -> RenderContext {
    let viewport = Viewport::new(800.0, 600.0, 2.0);
    pollster::block_on(initialize(
        &FixtureAssets::new(),
        renderer,
        &SceneConfig::default(),
        viewport,
        DefaultUniforms::default(),
    ))
    .expect("fixture initialization")
}
