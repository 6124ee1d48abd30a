use crate::graph::Scene;
use starlane_common::NodeId;
use std::collections::BTreeMap;

/// Handle referencing a scene inside a [`SceneSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(pub u32);

/// Registry of every scene in a session: one outer scene plus the inner
/// scenes reachable through portals.
///
/// Scenes are retained for the lifetime of the set; switching the active
/// render target never destroys the scene being left.
#[derive(Debug, Default)]
pub struct SceneSet {
    scenes: BTreeMap<SceneId, Scene>,
    outer: SceneId,
    portals: BTreeMap<NodeId, SceneId>,
    next: u32,
}

impl SceneSet {
    /// Create a set with the given outer scene.
    pub fn new(outer: Scene) -> Self {
        let mut set = Self::default();
        set.outer = set.insert(outer);
        set
    }

    /// The outer scene's id.
    pub fn outer(&self) -> SceneId {
        self.outer
    }

    /// Add a scene and return its handle.
    pub fn insert(&mut self, scene: Scene) -> SceneId {
        let id = SceneId(self.next);
        self.next += 1;
        self.scenes.insert(id, scene);
        id
    }

    /// Map a node to the inner scene entered when it is clicked.
    pub fn register_portal(&mut self, node: NodeId, scene: SceneId) {
        self.portals.insert(node, scene);
    }

    /// The inner scene behind a node, if one is registered.
    pub fn portal(&self, node: NodeId) -> Option<SceneId> {
        self.portals.get(&node).copied()
    }

    pub fn portal_count(&self) -> usize {
        self.portals.len()
    }

    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(&id)
    }

    pub fn get_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SceneId, &Scene)> {
        self.scenes.iter()
    }
}
