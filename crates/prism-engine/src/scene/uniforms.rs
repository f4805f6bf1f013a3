use glam::Vec2;

use super::TextureRef;

/// Uniforms the host refreshes every frame for shader materials.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct DefaultUniforms {
    /// Seconds since the frame loop started.
    pub time: f32,
    /// Render resolution in physical pixels.
    pub resolution: Vec2,
    /// Pointer position in physical pixels, top-left origin.
    pub pointer: Vec2,
}

/// Enumerated slots of a [`UniformTable`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformSlot {
    Time,
    Resolution,
    Pointer,
    EnvMap,
}

impl UniformSlot {
    pub const ALL: [UniformSlot; 4] = [Self::Time, Self::Resolution, Self::Pointer, Self::EnvMap];

    /// Name used in shader sources.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Resolution => "resolution",
            Self::Pointer => "pointer",
            Self::EnvMap => "env_map",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Texture(Option<TextureRef>),
}

/// Statically declared uniform table of a shader material.
///
/// Assembled once when the material is built: the host defaults plus the
/// `env_map` texture reference. Afterwards only the default slots change.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformTable {
    pub time: f32,
    pub resolution: Vec2,
    pub pointer: Vec2,
    pub env_map: Option<TextureRef>,
}

impl UniformTable {
    pub fn new(defaults: DefaultUniforms, env_map: Option<TextureRef>) -> Self {
        Self {
            time: defaults.time,
            resolution: defaults.resolution,
            pointer: defaults.pointer,
            env_map,
        }
    }

    /// Copies the host-managed slots; `env_map` is left untouched.
    pub fn apply_defaults(&mut self, defaults: DefaultUniforms) {
        self.time = defaults.time;
        self.resolution = defaults.resolution;
        self.pointer = defaults.pointer;
    }

    pub fn get(&self, slot: UniformSlot) -> UniformValue {
        match slot {
            UniformSlot::Time => UniformValue::Float(self.time),
            UniformSlot::Resolution => UniformValue::Vec2(self.resolution),
            UniformSlot::Pointer => UniformValue::Vec2(self.pointer),
            UniformSlot::EnvMap => UniformValue::Texture(self.env_map),
        }
    }
}
