use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use super::PerspectiveCamera;
use crate::input::{InputFrame, InputState, MouseButton};

const POLAR_EPS: f32 = 1e-4;
const DAMPING_REFERENCE_FPS: f32 = 60.0;
const MAX_ZOOM_SPEED: f32 = 0.99;

/// Damped orbit controller for a [`PerspectiveCamera`].
///
/// Left drag orbits around `center`, the wheel dollies in and out. With
/// damping on, pending rotation decays frame-rate independently, so the
/// camera keeps gliding for a moment after the drag ends.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    pub center: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,

    pending: Vec2,
}

impl OrbitControls {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 1.0,
            max_distance: 1000.0,
            center,
            radius,
            theta: 0.0,
            phi: PI / 2.0,
            pending: Vec2::ZERO,
        }
    }

    /// Controls orbiting the camera's current target from its current position.
    pub fn for_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length().max(POLAR_EPS);
        let mut controls = Self::new(camera.target, radius);
        controls.theta = offset.x.atan2(offset.z);
        controls.phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        controls
    }

    /// Rotation still to be applied by damping, in radians.
    pub fn pending_rotation(&self) -> Vec2 {
        self.pending
    }

    /// Polled once per frame. `viewport_height` is in logical pixels.
    ///
    /// Out-of-range tuning values are saturated here, never propagated as NaN.
    pub fn update(
        &mut self,
        camera: &mut PerspectiveCamera,
        state: &InputState,
        frame: &InputFrame,
        viewport_height: f32,
        dt: f32,
    ) {
        if state.button_down(MouseButton::Left) {
            let per_pixel = 2.0 * PI / viewport_height.max(1.0);
            let (dx, dy) = frame.pointer_delta;
            self.pending.x -= dx * per_pixel * self.rotate_speed;
            self.pending.y -= dy * per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            let damping = self.damping_factor.clamp(0.0, 1.0);
            let retention = (1.0 - damping).powf(dt * DAMPING_REFERENCE_FPS);
            let applied = self.pending * (1.0 - retention);
            self.theta += applied.x;
            self.phi += applied.y;
            self.pending *= retention;
        } else {
            self.theta += self.pending.x;
            self.phi += self.pending.y;
            self.pending = Vec2::ZERO;
        }
        self.phi = self.phi.clamp(POLAR_EPS, PI - POLAR_EPS);

        let wheel = frame.wheel.1;
        if wheel != 0.0 {
            let scale = (1.0 - self.zoom_speed.clamp(0.0, MAX_ZOOM_SPEED)).powf(wheel.abs());
            if wheel > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            let min = self.min_distance.max(POLAR_EPS);
            self.radius = self.radius.clamp(min, self.max_distance.max(min));
        }

        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let offset = Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius;

        camera.position = self.center + offset;
        camera.target = self.center;
    }
}
