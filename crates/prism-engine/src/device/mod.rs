//! wgpu device and window surface.
//!
//! [`Gpu`] owns the device, queue and surface. Frames are acquired with
//! [`Gpu::acquire_frame`], recorded by the renderer into the frame's single
//! encoder, then presented with [`Gpu::submit`].

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::GpuError;
pub use frame::GpuFrame;
pub use init::GpuInit;
