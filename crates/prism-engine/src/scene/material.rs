use std::borrow::Cow;
use std::sync::Arc;

use super::{ShaderId, TextureRef, UniformTable};

/// Surface description consumed by the renderer.
#[derive(Debug, Clone)]
pub enum Material {
    /// Unlit, optionally textured.
    Basic(BasicMaterial),
    /// Custom WGSL program with a uniform table.
    Shader(ShaderMaterial),
}

impl Material {
    pub fn as_shader(&self) -> Option<&ShaderMaterial> {
        match self {
            Self::Shader(m) => Some(m),
            Self::Basic(_) => None,
        }
    }

    pub fn as_shader_mut(&mut self) -> Option<&mut ShaderMaterial> {
        match self {
            Self::Shader(m) => Some(m),
            Self::Basic(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicMaterial {
    pub map: Option<TextureRef>,
    /// Linear RGBA multiplier.
    pub color: [f32; 4],
}

impl BasicMaterial {
    pub fn with_map(map: TextureRef) -> Self {
        Self { map: Some(map), color: [1.0; 4] }
    }
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self { map: None, color: [1.0; 4] }
    }
}

/// WGSL program for a [`ShaderMaterial`].
///
/// `source` must define `vs_main` and `fs_main`; the renderer prepends
/// the binding prelude (`render::SHADER_MATERIAL_PRELUDE`).
#[derive(Debug)]
pub struct ShaderProgram {
    id: ShaderId,
    pub label: &'static str,
    pub source: Cow<'static, str>,
}

impl ShaderProgram {
    pub fn new(label: &'static str, source: impl Into<Cow<'static, str>>) -> Arc<Self> {
        Arc::new(Self { id: ShaderId::fresh(), label, source: source.into() })
    }

    #[inline]
    pub fn id(&self) -> ShaderId {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct ShaderMaterial {
    pub program: Arc<ShaderProgram>,
    pub uniforms: UniformTable,
}
