use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::MeshId;

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    Empty,
    #[error("index count {0} is not a multiple of 3")]
    RaggedIndices(usize),
    #[error("index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Unit plane in the XY plane facing +Z, centered at the origin.
    ///
    /// UV (0, 0) is the top-left corner so image row 0 lands at the top.
    pub fn plane() -> Self {
        let v = |x: f32, y: f32, u: f32, w: f32| Vertex {
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [u, w],
        };
        Self {
            vertices: vec![
                v(-0.5, 0.5, 0.0, 0.0),
                v(0.5, 0.5, 1.0, 0.0),
                v(-0.5, -0.5, 0.0, 1.0),
                v(0.5, -0.5, 1.0, 1.0),
            ],
            indices: vec![0, 2, 1, 2, 3, 1],
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.vertices.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(self.indices.len()));
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= self.vertices.len()) {
            return Err(MeshError::IndexOutOfRange { index, vertices: self.vertices.len() });
        }
        Ok(())
    }

    /// Recomputes smooth vertex normals from triangle faces (area weighted).
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vec3::from(self.vertices[a].position);
            let pb = Vec3::from(self.vertices[b].position);
            let pc = Vec3::from(self.vertices[c].position);
            let n = (pb - pa).cross(pc - pa);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        for (v, n) in self.vertices.iter_mut().zip(acc) {
            v.normal = n.normalize_or(Vec3::Y).to_array();
        }
    }
}

/// Shared, identity-carrying mesh handle.
#[derive(Debug, Clone)]
pub struct Mesh {
    id: MeshId,
    data: Arc<MeshData>,
}

impl Mesh {
    pub fn new(data: MeshData) -> Result<Self, MeshError> {
        data.validate()?;
        Ok(Self { id: MeshId::fresh(), data: Arc::new(data) })
    }

    pub fn plane() -> Self {
        Self { id: MeshId::fresh(), data: Arc::new(MeshData::plane()) }
    }

    #[inline]
    pub fn id(&self) -> MeshId {
        self.id
    }

    #[inline]
    pub fn data(&self) -> &MeshData {
        &self.data
    }
}
