/// Viewport size in logical pixels plus the device pixel ratio.
///
/// Cameras and scene scale work in logical pixels; render targets are sized in
/// physical pixels via [`Viewport::physical_size`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        Self { width, height, scale_factor }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
            && self.scale_factor > 0.0
    }

    /// Returns a copy with every dimension clamped to at least one pixel.
    ///
    /// A non-finite or non-positive scale factor is treated as `1.0`.
    pub fn clamped(self) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        let scale = if self.scale_factor.is_finite() && self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        };
        Self::new(clamp(self.width), clamp(self.height), scale)
    }

    /// Width / height in logical pixels.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Size in physical pixels (`logical × scale_factor`), never below 1×1.
    pub fn physical_size(self) -> (u32, u32) {
        let w = (self.width * self.scale_factor).round().max(1.0) as u32;
        let h = (self.height * self.scale_factor).round().max(1.0) as u32;
        (w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_applies_scale_factor() {
        assert_eq!(Viewport::new(800.0, 600.0, 2.0).physical_size(), (1600, 1200));
        assert_eq!(Viewport::new(1280.0, 720.0, 1.5).physical_size(), (1920, 1080));
    }

    #[test]
    fn physical_size_never_zero() {
        assert_eq!(Viewport::new(0.0, 0.0, 1.0).physical_size(), (1, 1));
    }

    #[test]
    fn clamped_raises_degenerate_dimensions() {
        let v = Viewport::new(0.0, -5.0, 0.0).clamped();
        assert_eq!(v, Viewport::new(1.0, 1.0, 1.0));
        assert!(v.is_valid());
    }

    #[test]
    fn clamped_keeps_valid_viewport() {
        let v = Viewport::new(640.0, 480.0, 2.0);
        assert_eq!(v.clamped(), v);
    }

    #[test]
    fn aspect_is_width_over_height() {
        assert_eq!(Viewport::new(200.0, 100.0, 1.0).aspect(), 2.0);
    }
}
