use std::collections::HashMap;

use super::{Layers, Material, Mesh, Texture, TextureId, TextureRef, Transform};

/// Index of a node in its [`Scene`]. Nodes are never removed, so ids stay valid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A renderable node.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub layers: Layers,
    pub mesh: Mesh,
    pub material: Material,
}

impl Node {
    pub fn new(name: impl Into<String>, mesh: Mesh, material: Material) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            layers: Layers::DEFAULT,
            mesh,
            material,
        }
    }
}

/// Ordered node collection. Insertion order is draw order within a pass.
///
/// Also owns the image textures its materials reference, so renderers can
/// resolve a `TextureRef::Image` without a separate registry.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    textures: HashMap<TextureId, Texture>,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Registers an image texture and returns the reference materials use.
    pub fn add_texture(&mut self, texture: Texture) -> TextureRef {
        let r = texture.texture_ref();
        self.textures.insert(texture.id(), texture);
        r
    }

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    /// Nodes a camera with filter `layers` draws, in draw order.
    pub fn visible_to(&self, layers: Layers) -> impl Iterator<Item = (NodeId, &Node)> {
        self.iter().filter(move |(_, n)| n.layers.intersects(layers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::BasicMaterial;

    fn node(name: &str, layers: Layers) -> Node {
        let mut n = Node::new(name, Mesh::plane(), Material::Basic(BasicMaterial::default()));
        n.layers = layers;
        n
    }

    #[test]
    fn visible_to_filters_by_layer_intersection() {
        let mut scene = Scene::new();
        let bg = scene.add(node("bg", Layers::BACKGROUND));
        let fg = scene.add(node("fg", Layers::DEFAULT));

        let back: Vec<_> = scene.visible_to(Layers::BACKGROUND).map(|(id, _)| id).collect();
        let front: Vec<_> = scene.visible_to(Layers::DEFAULT).map(|(id, _)| id).collect();
        assert_eq!(back, vec![bg]);
        assert_eq!(front, vec![fg]);
    }

    #[test]
    fn insertion_order_is_draw_order() {
        let mut scene = Scene::new();
        let a = scene.add(node("a", Layers::DEFAULT));
        let b = scene.add(node("b", Layers::DEFAULT));
        let order: Vec<_> = scene.visible_to(Layers::DEFAULT).map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn textures_resolve_by_reference() {
        let mut scene = Scene::new();
        let tex = Texture::solid(1, 1, [255; 4]).unwrap();
        let id = tex.id();
        assert_eq!(scene.add_texture(tex), TextureRef::Image(id));
        assert_eq!(scene.texture(id).map(|t| t.size()), Some((1, 1)));
        assert!(scene.is_empty());
    }

    #[test]
    fn node_mut_edits_in_place() {
        let mut scene = Scene::new();
        let id = scene.add(node("a", Layers::DEFAULT));
        scene.node_mut(id).unwrap().transform.rotation.y = 1.0;
        assert_eq!(scene.node(id).unwrap().transform.rotation.y, 1.0);
    }
}
