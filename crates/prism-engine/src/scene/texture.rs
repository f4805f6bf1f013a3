use std::sync::Arc;

use super::{TargetId, TextureId};

/// How texel values are encoded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ColorSpace {
    /// Values are linear; sampled as-is.
    #[default]
    Linear,
    /// Values are sRGB encoded; decoded to linear on sample.
    Srgb,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture has zero size ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },
    #[error("expected {expected} bytes of RGBA8 data, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// CPU-side RGBA8 image.
#[derive(Debug, Clone)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
    pub color_space: ColorSpace,
}

impl Texture {
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroSize { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch { expected, actual: pixels.len() });
        }
        Ok(Self {
            id: TextureId::fresh(),
            width,
            height,
            pixels: pixels.into(),
            color_space: ColorSpace::Linear,
        })
    }

    /// Single-color texture.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, TextureError> {
        let n = width as usize * height as usize;
        Self::from_rgba8(width, height, rgba.repeat(n))
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width / height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reference suitable for a material slot.
    pub fn texture_ref(&self) -> TextureRef {
        TextureRef::Image(self.id)
    }
}

/// Reference from a material to a sampled texture.
///
/// `Target` references follow an offscreen target across resizes: the id is
/// stable while the GPU allocation behind it may change.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureRef {
    Image(TextureId),
    Target(TargetId),
}
