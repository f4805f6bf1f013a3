use std::path::{Path, PathBuf};

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

use crate::scene::{MeshData, MeshError, Texture, Transform, Vertex};

use super::{AssetError, AssetLoader, ModelAsset, ModelNode};

/// Loads assets from the filesystem, resolving relative paths against `root`.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() { p.to_path_buf() } else { self.root.join(p) }
    }

    /// Decodes a PNG/JPEG into an RGBA8 texture (linear color space).
    pub fn read_texture(&self, path: &str) -> Result<Texture, AssetError> {
        let path = self.resolve(path);
        let img = image::open(&path)
            .map_err(|source| AssetError::Image { path: path.clone(), source })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        log::debug!("decoded {} ({width}x{height})", path.display());
        Ok(Texture::from_rgba8(width, height, img.into_raw())?)
    }

    /// Imports a glTF/GLB file. Each root node of the default scene becomes a
    /// [`ModelNode`] whose mesh holds every triangle primitive of its subtree,
    /// baked into the root node's local space.
    pub fn read_model(&self, path: &str) -> Result<ModelAsset, AssetError> {
        let path = self.resolve(path);
        let (document, buffers, _images) = gltf::import(&path)
            .map_err(|source| AssetError::Gltf { path: path.clone(), source })?;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| AssetError::NoScene(path.clone()))?;

        let mut children = Vec::new();
        for node in scene.nodes() {
            let name = node
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("node_{}", node.index()));

            let (t, r, s) = node.transform().decomposed();
            let (rx, ry, rz) = Quat::from_array(r).to_euler(EulerRot::XYZ);
            let transform = Transform {
                position: Vec3::from_array(t),
                rotation: Vec3::new(rx, ry, rz),
                scale: Vec3::from_array(s),
            };

            let mut mesh = MeshData::default();
            let invalid = |source| AssetError::Mesh { node: name.clone(), source };
            append_subtree(&node, Mat4::IDENTITY, &buffers, &mut mesh).map_err(invalid)?;

            let mesh = if mesh.indices.is_empty() {
                None
            } else {
                mesh.validate().map_err(invalid)?;
                Some(mesh)
            };

            children.push(ModelNode { name, transform, mesh });
        }

        log::debug!("imported {} ({} root nodes)", path.display(), children.len());
        Ok(ModelAsset { children })
    }
}

impl AssetLoader for FsAssetLoader {
    async fn load_texture(&self, path: &str) -> Result<Texture, AssetError> {
        self.read_texture(path)
    }

    async fn load_model(&self, path: &str) -> Result<ModelAsset, AssetError> {
        self.read_model(path)
    }
}

fn append_subtree(
    node: &gltf::Node<'_>,
    to_root: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut MeshData,
) -> Result<(), MeshError> {
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("skipping non-triangle primitive in mesh {}", mesh.index());
                continue;
            }
            if let Some(part) = read_primitive(&primitive, to_root, buffers)? {
                let base = out.vertices.len() as u32;
                out.vertices.extend(part.vertices);
                out.indices.extend(part.indices.into_iter().map(|i| base + i));
            }
        }
    }
    for child in node.children() {
        let local = Mat4::from_cols_array_2d(&child.transform().matrix());
        append_subtree(&child, to_root * local, buffers, out)?;
    }
    Ok(())
}

/// One primitive in root space. Normals are generated only when the
/// primitive has none of its own.
fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    to_root: Mat4,
    buffers: &[gltf::buffer::Data],
) -> Result<Option<MeshData>, MeshError> {
    let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
    let Some(positions) = reader.read_positions() else { return Ok(None) };
    let positions: Vec<[f32; 3]> = positions.collect();
    if positions.is_empty() {
        return Ok(None);
    }
    let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());
    let uvs: Option<Vec<[f32; 2]>> = reader.read_tex_coords(0).map(|t| t.into_f32().collect());

    let normal_matrix = Mat3::from_mat4(to_root).inverse().transpose();
    let mut part = MeshData::default();

    for (i, p) in positions.iter().enumerate() {
        let position = to_root.transform_point3(Vec3::from_array(*p));
        let normal = normals
            .as_ref()
            .and_then(|n| n.get(i))
            .map(|n| (normal_matrix * Vec3::from_array(*n)).normalize_or_zero())
            .unwrap_or(Vec3::ZERO);
        let uv = uvs.as_ref().and_then(|u| u.get(i)).copied().unwrap_or([0.0; 2]);
        part.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        });
    }

    part.indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    if normals.is_none() {
        part.validate()?;
        part.compute_normals();
    }
    Ok(Some(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writes a one-triangle glTF (positions + u16 indices, no normals) with
    /// the given root-node JSON.
    fn write_triangle_gltf(dir: &Path, nodes_json: &str, scene_nodes: &str) -> String {
        let mut bin = Vec::new();
        for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
            for c in v {
                bin.extend_from_slice(&c.to_le_bytes());
            }
        }
        for i in [0u16, 1, 2, 0] {
            bin.extend_from_slice(&i.to_le_bytes());
        }
        std::fs::write(dir.join("tri.bin"), &bin).unwrap();

        let json = format!(
            r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": {scene_nodes} }}],
  "nodes": {nodes_json},
  "meshes": [{{ "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "indices": 1 }}] }}],
  "buffers": [{{ "uri": "tri.bin", "byteLength": 44 }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ]
}}"#
        );
        std::fs::write(dir.join("tri.gltf"), json).unwrap();
        "tri.gltf".to_string()
    }

    #[test]
    fn reads_png_as_rgba8() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::from_pixel(2, 1, image::Rgba([10, 20, 30, 255]))
            .save(dir.path().join("bg.png"))
            .unwrap();

        let loader = FsAssetLoader::new(dir.path());
        let tex = loader.read_texture("bg.png").unwrap();
        assert_eq!(tex.size(), (2, 1));
        assert_eq!(&tex.pixels()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn missing_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FsAssetLoader::new(dir.path());
        assert!(matches!(loader.read_texture("nope.png"), Err(AssetError::Image { .. })));
    }

    #[test]
    fn imports_root_nodes_with_generated_normals() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_triangle_gltf(
            dir.path(),
            r#"[{ "name": "gem", "mesh": 0, "translation": [0.0, 2.0, 0.0] }]"#,
            "[0]",
        );

        let model = pollster::block_on(FsAssetLoader::new(dir.path()).load_model(&file)).unwrap();
        assert_eq!(model.children.len(), 1);
        let gem = &model.children[0];
        assert_eq!(gem.name, "gem");
        assert_eq!(gem.transform.position, Vec3::new(0.0, 2.0, 0.0));

        let mesh = gem.mesh.as_ref().unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert!((Vec3::from_array(mesh.vertices[0].normal) - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn child_geometry_is_baked_into_root_space() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_triangle_gltf(
            dir.path(),
            r#"[{ "name": "root", "children": [1] }, { "mesh": 0, "translation": [5.0, 0.0, 0.0] }]"#,
            "[0]",
        );

        let model = FsAssetLoader::new(dir.path()).read_model(&file).unwrap();
        let root = model.first_mesh_child().unwrap();
        assert_eq!(root.name, "root");
        assert_eq!(root.mesh.as_ref().unwrap().vertices[0].position, [5.0, 0.0, 0.0]);
    }

    #[test]
    fn authored_normals_survive_a_sibling_without_normals() {
        let dir = tempfile::tempdir().unwrap();
        let mut bin = Vec::new();
        for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
            bin.extend(v.iter().flat_map(|c| c.to_le_bytes()));
        }
        for _ in 0..3 {
            bin.extend([1.0f32, 0.0, 0.0].iter().flat_map(|c| c.to_le_bytes()));
        }
        for i in [0u16, 1, 2, 0] {
            bin.extend_from_slice(&i.to_le_bytes());
        }
        std::fs::write(dir.path().join("two.bin"), &bin).unwrap();
        let json = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "name": "gem", "mesh": 0 }],
  "meshes": [{ "primitives": [
    { "attributes": { "POSITION": 0, "NORMAL": 1 }, "indices": 2 },
    { "attributes": { "POSITION": 0 }, "indices": 2 }
  ] }],
  "buffers": [{ "uri": "two.bin", "byteLength": 80 }],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 72, "byteLength": 6 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3" },
    { "bufferView": 2, "componentType": 5123, "count": 3, "type": "SCALAR" }
  ]
}"#;
        std::fs::write(dir.path().join("two.gltf"), json).unwrap();

        let model = FsAssetLoader::new(dir.path()).read_model("two.gltf").unwrap();
        let mesh = model.children[0].mesh.as_ref().unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        for v in &mesh.vertices[..3] {
            assert_eq!(v.normal, [1.0, 0.0, 0.0], "authored normal overwritten");
        }
        for v in &mesh.vertices[3..] {
            assert!((Vec3::from_array(v.normal) - Vec3::Z).length() < 1e-5);
        }
    }
}
