/// Device and surface preferences.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one. Without it
    /// the renderer encodes screen output in the fragment shader.
    pub prefer_srgb: bool,
    pub present_mode: wgpu::PresentMode,
    pub power_preference: wgpu::PowerPreference,
    /// Limits requested from the adapter. `max_texture_dimension_2d` also
    /// bounds the environment capture target.
    pub required_limits: wgpu::Limits,
    pub desired_maximum_frame_latency: u32,
    /// MSAA samples for on-screen passes. Lowered to the largest count the
    /// adapter supports for the surface and depth formats.
    pub sample_count: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            sample_count: 4,
        }
    }
}
