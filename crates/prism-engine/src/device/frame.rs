/// One acquired swapchain image plus the encoder every pass records into.
///
/// Hold it only for the duration of a frame: the next image cannot be
/// acquired while this one is alive.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Swapchain image size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let t = &self.surface_texture.texture;
        (t.width(), t.height())
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_texture.texture.format()
    }
}
