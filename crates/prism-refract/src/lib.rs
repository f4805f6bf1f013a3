//! Screen-space refraction over a live backdrop.
//!
//! Each frame runs two passes against a [`Renderer`](prism_engine::render::Renderer):
//!
//! 1. environment capture: the backdrop quad, seen by the orthographic
//!    camera, is drawn into an offscreen target the size of the window
//! 2. composite: the same backdrop is drawn to the screen, depth is cleared,
//!    and the spinning model is drawn with a material that samples the
//!    captured target at a refracted screen position
//!
//! Visibility is split by layers: the backdrop lives on `BACKGROUND` and the
//! model on `DEFAULT`, so neither camera ever sees the other's node.

mod app;
mod capture;
mod composite;
mod config;
mod context;
mod error;
mod frame;
mod init;
mod lifecycle;
mod refraction;
mod resize;

#[cfg(test)]
mod testing;

pub use app::RefractionApp;
pub use capture::capture_environment;
pub use composite::{advance_rotation, composite};
pub use config::{CameraConfig, ConfigError, ControlsConfig, OrthoConfig, SceneConfig};
pub use context::RenderContext;
pub use error::{InitError, PrismError};
pub use frame::{configure_renderer, run_frame, FrameInput};
pub use init::initialize;
pub use lifecycle::{Lifecycle, LifecycleError};
pub use refraction::{
    base_reflectance, env_uv, fresnel_schlick, reflect, refract, refraction_material, refraction_program, IOR,
    REFRACTION_STRENGTH,
};
pub use resize::resize;
