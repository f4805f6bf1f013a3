//! Prism engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by higher layers:
//! window loop, wgpu device, input, timing, and a small retained 3D scene
//! with cameras, a render contract and asset loaders.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod scene;
pub mod camera;
pub mod render;
pub mod assets;
