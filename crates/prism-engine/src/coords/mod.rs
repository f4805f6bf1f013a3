//! Viewport and pixel-space conventions.
//!
//! Two spaces are in play:
//! - logical pixels (DPI-independent), used for camera frusta and scene scale
//! - physical pixels (`logical × scale_factor`), used for render target sizes
//!
//! Framebuffer origin is top-left, +Y down, matching wgpu.

mod viewport;

pub use viewport::Viewport;
