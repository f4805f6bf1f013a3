use bytemuck::{Pod, Zeroable};

use crate::camera::Camera;
use crate::scene::{Material, Node};

/// Byte size of [`DrawUniforms`]; must match `DrawUniforms` in `prelude.wgsl`.
pub(super) const DRAW_UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniforms>() as u64;

/// Per-draw uniform block (group 0, dynamic offset).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct DrawUniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    camera_position: [f32; 4],
    color: [f32; 4],
    resolution: [f32; 2],
    pointer: [f32; 2],
    time: f32,
    _pad: [f32; 3],
}

impl DrawUniforms {
    pub(super) fn new(node: &Node, camera: &dyn Camera, encode_srgb: bool) -> Self {
        let eye = camera.position();
        let mut u = Self {
            model: node.transform.matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            normal_matrix: node.transform.normal_matrix().to_cols_array_2d(),
            camera_position: [eye.x, eye.y, eye.z, if encode_srgb { 1.0 } else { 0.0 }],
            color: [1.0; 4],
            resolution: [0.0; 2],
            pointer: [0.0; 2],
            time: 0.0,
            _pad: [0.0; 3],
        };
        match &node.material {
            Material::Basic(m) => u.color = m.color,
            Material::Shader(m) => {
                u.resolution = m.uniforms.resolution.to_array();
                u.pointer = m.uniforms.pointer.to_array();
                u.time = m.uniforms.time;
            }
        }
        u
    }

    #[cfg(test)]
    fn model(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array_2d(&self.model)
    }
}

/// Distance between consecutive draw slots in the uniform buffer.
pub(super) fn slot_stride(min_offset_alignment: u32) -> u64 {
    let align = u64::from(min_offset_alignment.max(1));
    DRAW_UNIFORM_SIZE.div_ceil(align) * align
}
