use glam::Vec3;
use starlane_common::{Color, NodeId, Transform};
use std::collections::BTreeMap;

/// Renderable shape carried by a scene node.
///
/// Spheres and cubes are pickable; lines and tori are decoration only.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Cube { half_extent: f32 },
    Torus { radius: f32, tube: f32 },
    /// Line-list segments in local space, consumed in pairs.
    Lines { points: Vec<Vec3> },
}

/// Point light owned by a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
}

impl PointLight {
    pub fn white(position: Vec3) -> Self {
        Self {
            position,
            color: Color::WHITE,
            intensity: 1.0,
            range: 100.0,
        }
    }
}

/// A node in the scene graph: shape, placement, color, and interaction state.
///
/// Nodes are created at scene construction and never destroyed during a
/// session; only the hover tint mutates afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub transform: Transform,
    pub shape: Shape,
    pub color: Color,
    pub label: Option<String>,
    pub interactive: bool,
    base_color: Color,
    hovered: bool,
}

impl Node {
    pub fn new(shape: Shape, transform: Transform, color: Color) -> Self {
        Self {
            transform,
            shape,
            color,
            label: None,
            interactive: false,
            base_color: color,
            hovered: false,
        }
    }

    /// Mark as pickable, with the text shown while hovered.
    pub fn interactive(mut self, label: impl Into<String>) -> Self {
        self.interactive = true;
        self.label = Some(label.into());
        self
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Apply the hover tint, caching the current color for restore.
    /// Idempotent while already hovered.
    pub fn set_hovered(&mut self) {
        if !self.hovered {
            self.base_color = self.color;
            self.color = Color::HIGHLIGHT;
            self.hovered = true;
        }
    }

    /// Restore the cached color. Idempotent while not hovered.
    pub fn clear_hovered(&mut self) {
        if self.hovered {
            self.color = self.base_color;
            self.hovered = false;
        }
    }
}

/// A self-contained scene: nodes plus lights.
///
/// Nodes are keyed by `NodeId` in a BTreeMap so iteration order is
/// deterministic across runs and platforms.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub name: String,
    nodes: BTreeMap<NodeId, Node>,
    lights: Vec<PointLight>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: BTreeMap::new(),
            lights: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, node);
        id
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Pickable nodes in deterministic id order.
    pub fn interactive_nodes(&self) -> impl Iterator<Item = (&NodeId, &Node)> {
        self.nodes.iter().filter(|(_, n)| n.interactive)
    }

    /// Add a straight hyperlane segment between the positions of two nodes.
    /// Returns None if either endpoint is missing.
    pub fn link(&mut self, a: NodeId, b: NodeId, color: Color) -> Option<NodeId> {
        let start = self.nodes.get(&a)?.transform.position;
        let end = self.nodes.get(&b)?.transform.position;
        let lane = Node::new(
            Shape::Lines {
                points: vec![start, end],
            },
            Transform::default(),
            color,
        );
        Some(self.add_node(lane))
    }

    /// Tint one node. Returns false if the id is unknown.
    pub fn set_hover(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.set_hovered();
                true
            }
            None => false,
        }
    }

    /// Restore every hovered node to its cached color. Returns how many
    /// nodes were cleared.
    pub fn clear_hover(&mut self) -> usize {
        let mut cleared = 0;
        for node in self.nodes.values_mut() {
            if node.is_hovered() {
                node.clear_hovered();
                cleared += 1;
            }
        }
        cleared
    }

    /// The currently hovered node, if any. At most one by construction
    /// (the resolver clears before tinting).
    pub fn hovered(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.is_hovered())
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(position: Vec3, hex: u32) -> Node {
        Node::new(
            Shape::Sphere { radius: 0.5 },
            Transform::at(position),
            Color::from_hex(hex),
        )
        .interactive("test star")
    }

    #[test]
    fn add_and_lookup() {
        let mut scene = Scene::new("test");
        let id = scene.add_node(star(Vec3::ZERO, 0xff0000));
        assert_eq!(scene.node_count(), 1);
        assert!(scene.node(id).is_some());
        assert!(scene.node(NodeId::new()).is_none());
    }

    #[test]
    fn hover_round_trip_restores_exact_color() {
        let mut scene = Scene::new("test");
        let id = scene.add_node(star(Vec3::ZERO, 0x00ff00));
        let original = scene.node(id).unwrap().color;

        assert!(scene.set_hover(id));
        assert_eq!(scene.node(id).unwrap().color, Color::HIGHLIGHT);
        assert!(scene.node(id).unwrap().is_hovered());

        scene.clear_hover();
        assert_eq!(scene.node(id).unwrap().color, original);
        assert!(!scene.node(id).unwrap().is_hovered());
    }

    #[test]
    fn set_hover_is_idempotent() {
        let mut scene = Scene::new("test");
        let id = scene.add_node(star(Vec3::ZERO, 0x0000ff));
        scene.set_hover(id);
        // A second tint must not cache the highlight as the base color.
        scene.set_hover(id);
        scene.clear_hover();
        assert_eq!(scene.node(id).unwrap().color, Color::from_hex(0x0000ff));
    }

    #[test]
    fn clear_hover_counts_and_clears_all() {
        let mut scene = Scene::new("test");
        let a = scene.add_node(star(Vec3::ZERO, 0xff0000));
        let b = scene.add_node(star(Vec3::X, 0x00ff00));
        scene.set_hover(a);
        scene.set_hover(b);
        assert_eq!(scene.clear_hover(), 2);
        assert_eq!(scene.hovered(), None);
    }

    #[test]
    fn hovered_reports_the_tinted_node() {
        let mut scene = Scene::new("test");
        let a = scene.add_node(star(Vec3::ZERO, 0xff0000));
        assert_eq!(scene.hovered(), None);
        scene.set_hover(a);
        assert_eq!(scene.hovered(), Some(a));
    }

    #[test]
    fn link_uses_endpoint_positions() {
        let mut scene = Scene::new("test");
        let a = scene.add_node(star(Vec3::new(-5.0, 0.0, 0.0), 0xff0000));
        let b = scene.add_node(star(Vec3::new(5.0, 0.0, 0.0), 0x00ff00));
        let lane = scene.link(a, b, Color::WHITE).unwrap();

        match &scene.node(lane).unwrap().shape {
            Shape::Lines { points } => {
                assert_eq!(points[0], Vec3::new(-5.0, 0.0, 0.0));
                assert_eq!(points[1], Vec3::new(5.0, 0.0, 0.0));
            }
            other => panic!("expected lines, got {other:?}"),
        }
        assert!(!scene.node(lane).unwrap().interactive);
    }

    #[test]
    fn link_missing_endpoint_is_none() {
        let mut scene = Scene::new("test");
        let a = scene.add_node(star(Vec3::ZERO, 0xff0000));
        assert!(scene.link(a, NodeId::new(), Color::WHITE).is_none());
    }

    #[test]
    fn interactive_filter_skips_lanes() {
        let mut scene = Scene::new("test");
        let a = scene.add_node(star(Vec3::ZERO, 0xff0000));
        let b = scene.add_node(star(Vec3::X, 0x00ff00));
        scene.link(a, b, Color::WHITE);
        assert_eq!(scene.interactive_nodes().count(), 2);
        assert_eq!(scene.node_count(), 3);
    }
}
