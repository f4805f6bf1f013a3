//! Cameras and camera controllers.
//!
//! Matrices follow wgpu conventions: right-handed view space looking down
//! -Z, clip-space depth in `[0, 1]` (glam's `*_rh` projections).

mod orbit;
mod orthographic;
mod perspective;

use glam::{Mat4, Vec3};

use crate::scene::Layers;

pub use orbit::OrbitControls;
pub use orthographic::OrthographicCamera;
pub use perspective::PerspectiveCamera;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CameraKind {
    Orthographic,
    Perspective,
}

/// What the renderer needs from a camera.
pub trait Camera {
    fn kind(&self) -> CameraKind;

    /// Visibility filter: nodes whose layers intersect this set are drawn.
    fn layers(&self) -> Layers;

    fn position(&self) -> Vec3;

    fn view_matrix(&self) -> Mat4;

    fn projection_matrix(&self) -> Mat4;

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
