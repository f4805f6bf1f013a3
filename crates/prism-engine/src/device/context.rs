use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{self, SurfaceState};
use super::{GpuError, GpuFrame, GpuInit};
use crate::render::DEPTH_FORMAT;

/// Device, queue and window surface.
///
/// The window must outlive the surface, hence the `'w` borrow.
pub struct Gpu<'w> {
    _instance: wgpu::Instance,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: SurfaceState<'w>,
    sample_count: u32,
    /// Set from the device-lost callback; checked before every frame.
    lost: Arc<AtomicBool>,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let raw_surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&raw_surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("prism device"),
                required_features: wgpu::Features::empty(),
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let lost = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&lost);
        device.set_device_lost_callback(move |reason, message| {
            log::error!("GPU device lost ({reason:?}): {message}");
            flag.store(true, Ordering::Release);
        });

        let caps = raw_surface.get_capabilities(&adapter);
        let format = surface::choose_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no supported formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        let surface = SurfaceState::new(raw_surface, config, &device);

        let color_flags = adapter.get_texture_format_features(format).flags;
        let depth_flags = adapter.get_texture_format_features(DEPTH_FORMAT).flags;
        let sample_count = surface::choose_sample_count(init.sample_count, |n| {
            color_flags.sample_count_supported(n) && depth_flags.sample_count_supported(n)
        });
        log::debug!("on-screen passes use {sample_count}x MSAA");

        Ok(Self {
            _instance: instance,
            device,
            queue,
            surface,
            sample_count,
            lost,
        })
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.surface.size()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// MSAA sample count for passes that present to the surface.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn is_lost(&self) -> bool {
        self.lost.load(Ordering::Acquire)
    }

    /// Shared flag raised when the device is lost.
    pub fn lost_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.lost)
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.surface.resize(&self.device, size);
    }

    /// Acquires the next swapchain image with a fresh encoder.
    ///
    /// `Ok(None)` means skip this frame (minimized window, stale surface).
    pub fn acquire_frame(&mut self) -> Result<Option<GpuFrame>, GpuError> {
        if self.is_lost() {
            return Err(GpuError::DeviceLost);
        }
        let Some(surface_texture) = self.surface.acquire(&self.device)? else {
            return Ok(None);
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("prism frame encoder") });
        Ok(Some(GpuFrame { surface_texture, view, encoder }))
    }

    /// Submits every pass recorded into `frame` and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, view, encoder } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }
}
