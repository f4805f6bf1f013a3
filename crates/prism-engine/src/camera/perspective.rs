use glam::{Mat4, Vec3};

use super::{Camera, CameraKind};
use crate::scene::Layers;

/// Perspective camera looking from `position` at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub layers: Layers,
}

impl PerspectiveCamera {
    /// Camera factory: `(fov in degrees, near, far, position)`, looking at the origin.
    pub fn new(fov: f32, near: f32, far: f32, position: Vec3) -> Self {
        Self {
            fov,
            aspect: 1.0,
            near,
            far,
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            layers: Layers::DEFAULT,
        }
    }

    /// Updates the projection for a new viewport aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }
}

impl Camera for PerspectiveCamera {
    fn kind(&self) -> CameraKind {
        CameraKind::Perspective
    }

    fn layers(&self) -> Layers {
        self.layers
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }
}
