use glam::{EulerRot, Mat4, Quat, Vec3};

/// Local transform: translation, Euler XYZ rotation (radians) and scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix `T * R * S`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }

    /// Inverse-transpose of the model matrix, for transforming normals.
    pub fn normal_matrix(&self) -> Mat4 {
        self.matrix().inverse().transpose()
    }
}
