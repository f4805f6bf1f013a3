use glam::{Mat4, Vec3};

use super::{Camera, CameraKind};
use crate::scene::Layers;

/// Axis-aligned orthographic camera looking down -Z.
///
/// Frustum bounds are in world units; the backdrop setup uses logical pixels
/// so that one unit maps to one pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub layers: Layers,
}

impl OrthographicCamera {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            near,
            far,
            position: Vec3::ZERO,
            layers: Layers::DEFAULT,
        }
    }

    /// Frustum centered on the view axis covering `width × height` units.
    pub fn centered(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::new(-width / 2.0, width / 2.0, height / 2.0, -height / 2.0, near, far)
    }

    pub fn set_bounds(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        self.left = left;
        self.right = right;
        self.top = top;
        self.bottom = bottom;
    }

    /// `(left, right, top, bottom)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.left, self.right, self.top, self.bottom)
    }
}

impl Camera for OrthographicCamera {
    fn kind(&self) -> CameraKind {
        CameraKind::Orthographic
    }

    fn layers(&self) -> Layers {
        self.layers
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn centered_bounds() {
        let cam = OrthographicCamera::centered(800.0, 600.0, 1.0, 1000.0);
        assert_eq!(cam.bounds(), (-400.0, 400.0, 300.0, -300.0));
    }

    #[test]
    fn frustum_corners_map_to_ndc_corners() {
        let mut cam = OrthographicCamera::centered(800.0, 600.0, 1.0, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 5.0);
        let vp = cam.view_projection();

        let top_right = vp * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert!((top_right.x - 1.0).abs() < 1e-5);
        assert!((top_right.y - 1.0).abs() < 1e-5);
        assert!((0.0..=1.0).contains(&top_right.z));

        let bottom_left = vp * Vec4::new(-400.0, -300.0, 0.0, 1.0);
        assert!((bottom_left.x + 1.0).abs() < 1e-5);
        assert!((bottom_left.y + 1.0).abs() < 1e-5);
    }
}
