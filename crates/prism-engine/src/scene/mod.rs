//! Retained scene model.
//!
//! Responsibilities:
//! - store renderable nodes in draw order
//! - tag nodes with visibility layers consulted by cameras
//! - hold CPU-side meshes, textures and materials that the GPU renderer mirrors
//!
//! A node is drawn by a camera iff `node.layers.intersects(camera.layers())`.

mod ids;
mod layers;
mod list;
mod material;
mod mesh;
mod texture;
mod transform;
mod uniforms;

pub use ids::{MeshId, ShaderId, TargetId, TextureId};
pub use layers::Layers;
pub use list::{Node, NodeId, Scene};
pub use material::{BasicMaterial, Material, ShaderMaterial, ShaderProgram};
pub use mesh::{Mesh, MeshData, MeshError, Vertex};
pub use texture::{ColorSpace, Texture, TextureError, TextureRef};
pub use transform::Transform;
pub use uniforms::{DefaultUniforms, UniformSlot, UniformTable, UniformValue};
