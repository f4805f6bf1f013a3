use crate::scene::{TargetId, TextureRef};

use super::RenderError;

/// CPU-side descriptor of an offscreen color + depth target.
///
/// The id never changes; resizing bumps `generation`, which tells the GPU
/// renderer to reallocate the texture behind it. Materials keep referencing
/// the target through [`OffscreenTarget::texture`], so their binding stays
/// valid across resizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffscreenTarget {
    id: TargetId,
    width: u32,
    height: u32,
    max_dimension: u32,
    generation: u64,
}

impl OffscreenTarget {
    /// Target of `width × height` physical pixels (each clamped to ≥ 1).
    ///
    /// Fails if either edge exceeds `max_dimension`.
    pub fn new(width: u32, height: u32, max_dimension: u32) -> Result<Self, RenderError> {
        let (width, height) = (width.max(1), height.max(1));
        check_size(width, height, max_dimension)?;
        Ok(Self {
            id: TargetId::fresh(),
            width,
            height,
            max_dimension,
            generation: 0,
        })
    }

    #[inline]
    pub fn id(&self) -> TargetId {
        self.id
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Texture reference for material slots; identical for the target's lifetime.
    #[inline]
    pub fn texture(&self) -> TextureRef {
        TextureRef::Target(self.id)
    }

    /// Resizes in place. Sizes are clamped to `[1, max_dimension]`.
    ///
    /// Returns `true` if the size changed.
    pub fn set_size(&mut self, width: u32, height: u32) -> bool {
        let max = self.max_dimension.max(1);
        if width > max || height > max {
            log::warn!("offscreen target {width}x{height} clamped to device limit {max}");
        }
        let (width, height) = (width.clamp(1, max), height.clamp(1, max));
        if (width, height) == (self.width, self.height) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.generation += 1;
        true
    }
}

fn check_size(width: u32, height: u32, max: u32) -> Result<(), RenderError> {
    if width > max || height > max {
        return Err(RenderError::TargetTooLarge { width, height, max });
    }
    Ok(())
}

/// Where subsequent draws land.
#[derive(Debug, Copy, Clone)]
pub enum RenderTargetBinding<'a> {
    /// The window surface.
    Screen,
    Offscreen(&'a OffscreenTarget),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_keeps_identity() {
        let mut t = OffscreenTarget::new(800, 600, 8192).unwrap();
        let tex = t.texture();
        assert!(t.set_size(1024, 768));
        assert_eq!(t.texture(), tex);
        assert_eq!(t.size(), (1024, 768));
        assert_eq!(t.generation(), 1);
    }

    #[test]
    fn same_size_is_not_a_change() {
        let mut t = OffscreenTarget::new(800, 600, 8192).unwrap();
        assert!(!t.set_size(800, 600));
        assert_eq!(t.generation(), 0);
    }

    #[test]
    fn zero_sizes_clamp_to_one() {
        let mut t = OffscreenTarget::new(0, 0, 8192).unwrap();
        assert_eq!(t.size(), (1, 1));
        t.set_size(0, 5);
        assert_eq!(t.size(), (1, 5));
    }

    #[test]
    fn oversized_allocation_fails() {
        let err = OffscreenTarget::new(10_000, 10, 8192).unwrap_err();
        assert!(matches!(err, RenderError::TargetTooLarge { width: 10_000, .. }));
    }

    #[test]
    fn oversized_resize_clamps() {
        let mut t = OffscreenTarget::new(10, 10, 4096).unwrap();
        t.set_size(5000, 100);
        assert_eq!(t.size(), (4096, 100));
    }
}
