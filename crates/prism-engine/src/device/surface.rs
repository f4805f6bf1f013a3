use winit::dpi::PhysicalSize;

use super::GpuError;

/// Window surface plus the configuration it was last configured with.
pub(crate) struct SurfaceState<'w> {
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    /// Latest window size; may be zero while minimized.
    size: PhysicalSize<u32>,
}

impl<'w> SurfaceState<'w> {
    pub fn new(surface: wgpu::Surface<'w>, config: wgpu::SurfaceConfiguration, device: &wgpu::Device) -> Self {
        surface.configure(device, &config);
        let size = PhysicalSize::new(config.width, config.height);
        log::debug!("surface configured: {:?} {}x{}", config.format, size.width, size.height);
        Self { surface, config, size }
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn drawable(&self) -> bool {
        self.size.width > 0 && self.size.height > 0
    }

    /// Records the new size and reconfigures unless it has zero area.
    pub fn resize(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
        self.size = size;
        if !self.drawable() {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(device, &self.config);
    }

    /// Next swapchain image, or `None` when this frame should be skipped.
    pub fn acquire(&mut self, device: &wgpu::Device) -> Result<Option<wgpu::SurfaceTexture>, GpuError> {
        if !self.drawable() {
            return Ok(None);
        }
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(Some(texture)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated; reconfiguring");
                self.surface.configure(device, &self.config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(GpuError::OutOfMemory),
            Err(err @ (wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other)) => {
                log::warn!("surface {err:?}; skipping frame");
                Ok(None)
            }
        }
    }
}

/// Prefers an sRGB swapchain format when asked; otherwise the surface's first.
pub(crate) fn choose_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;
    if !prefer_srgb {
        return Some(first);
    }
    let srgb = formats.iter().copied().find(|f| f.is_srgb());
    if srgb.is_none() {
        log::warn!("no sRGB surface format; screen output will be encoded in the shader");
    }
    Some(srgb.unwrap_or(first))
}

/// Opaque when supported: the backdrop covers the whole window.
pub(crate) fn choose_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    if modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

/// Largest power of two not above `requested` that `supported` accepts; 1 always is.
pub(crate) fn choose_sample_count(requested: u32, supported: impl Fn(u32) -> bool) -> u32 {
    let mut count = requested.max(1).next_power_of_two();
    if count > requested.max(1) {
        count /= 2;
    }
    while count > 1 && !supported(count) {
        count /= 2;
    }
    if count != requested {
        log::warn!("{requested}x MSAA unavailable; using {count}x");
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    #[test]
    fn srgb_preferred_when_available() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(choose_format(&formats, true), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(choose_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        assert_eq!(choose_format(&[TextureFormat::Rgba16Float], true), Some(TextureFormat::Rgba16Float));
        assert_eq!(choose_format(&[], true), None);
    }

    #[test]
    fn opaque_alpha_when_supported() {
        let modes = [CompositeAlphaMode::PreMultiplied, CompositeAlphaMode::Opaque];
        assert_eq!(choose_alpha_mode(&modes), CompositeAlphaMode::Opaque);
        assert_eq!(choose_alpha_mode(&[CompositeAlphaMode::Inherit]), CompositeAlphaMode::Inherit);
        assert_eq!(choose_alpha_mode(&[]), CompositeAlphaMode::Auto);
    }

    #[test]
    fn sample_count_kept_when_supported() {
        assert_eq!(choose_sample_count(4, |n| n <= 8), 4);
        assert_eq!(choose_sample_count(1, |_| false), 1);
    }

    #[test]
    fn sample_count_steps_down_to_supported() {
        assert_eq!(choose_sample_count(8, |n| n == 2 || n == 4), 4);
        assert_eq!(choose_sample_count(4, |_| false), 1);
        assert_eq!(choose_sample_count(6, |n| n == 4), 4);
        assert_eq!(choose_sample_count(0, |_| true), 1);
    }
}
