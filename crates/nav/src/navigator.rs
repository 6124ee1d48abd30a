use starlane_common::NodeId;
use starlane_scene::{SceneId, SceneSet};

/// Scene navigation state machine.
///
/// States are `Outer` (empty stack) and `Inner` (top of stack). Entering a
/// portal pushes; `back` pops. Every inner state can reach the outer scene
/// again, so no transition is terminal.
pub struct SceneNavigator {
    outer: SceneId,
    stack: Vec<SceneId>,
}

impl SceneNavigator {
    /// Start at the outer scene.
    pub fn new(outer: SceneId) -> Self {
        Self {
            outer,
            stack: Vec::new(),
        }
    }

    /// The scene currently rendered.
    pub fn active(&self) -> SceneId {
        *self.stack.last().unwrap_or(&self.outer)
    }

    /// True while no inner scene has been entered.
    pub fn at_outer(&self) -> bool {
        self.stack.is_empty()
    }

    /// How many inner scenes deep the session currently is.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Enter an inner scene directly.
    pub fn enter(&mut self, scene: SceneId) {
        tracing::info!(?scene, "entering inner scene");
        self.stack.push(scene);
    }

    /// Enter the inner scene registered for a clicked node, if any.
    /// Returns true when a transition happened; clicking a node without a
    /// portal (or a stale id) changes nothing.
    pub fn enter_portal(&mut self, set: &SceneSet, node: NodeId) -> bool {
        match set.portal(node) {
            Some(scene) => {
                self.enter(scene);
                true
            }
            None => false,
        }
    }

    /// Return to the previous scene. Returns false when already at the
    /// outer scene.
    pub fn back(&mut self) -> bool {
        let left = self.stack.pop();
        if let Some(scene) = left {
            tracing::info!(?scene, "leaving inner scene");
        }
        left.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlane_scene::Scene;

    fn set_with_inner() -> (SceneSet, SceneId) {
        let mut set = SceneSet::new(Scene::new("outer"));
        let inner = set.insert(Scene::new("inner"));
        (set, inner)
    }

    #[test]
    fn starts_at_outer() {
        let (set, _) = set_with_inner();
        let nav = SceneNavigator::new(set.outer());
        assert!(nav.at_outer());
        assert_eq!(nav.active(), set.outer());
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn enter_switches_active_scene() {
        let (set, inner) = set_with_inner();
        let mut nav = SceneNavigator::new(set.outer());
        nav.enter(inner);
        assert_eq!(nav.active(), inner);
        assert!(!nav.at_outer());
    }

    #[test]
    fn back_returns_to_outer() {
        let (set, inner) = set_with_inner();
        let mut nav = SceneNavigator::new(set.outer());
        nav.enter(inner);
        assert!(nav.back());
        assert_eq!(nav.active(), set.outer());
        assert!(nav.at_outer());
    }

    #[test]
    fn back_at_outer_is_a_no_op() {
        let (set, _) = set_with_inner();
        let mut nav = SceneNavigator::new(set.outer());
        assert!(!nav.back());
        assert_eq!(nav.active(), set.outer());
    }

    #[test]
    fn portal_click_enters_mapped_scene() {
        let (mut set, inner) = set_with_inner();
        let node = NodeId::new();
        set.register_portal(node, inner);

        let mut nav = SceneNavigator::new(set.outer());
        assert!(nav.enter_portal(&set, node));
        assert_eq!(nav.active(), inner);
    }

    #[test]
    fn unmapped_click_changes_nothing() {
        let (set, _) = set_with_inner();
        let mut nav = SceneNavigator::new(set.outer());
        assert!(!nav.enter_portal(&set, NodeId::new()));
        assert_eq!(nav.active(), set.outer());
        assert!(nav.at_outer());
    }

    #[test]
    fn nested_entries_unwind_in_order() {
        let mut set = SceneSet::new(Scene::new("outer"));
        let a = set.insert(Scene::new("a"));
        let b = set.insert(Scene::new("b"));

        let mut nav = SceneNavigator::new(set.outer());
        nav.enter(a);
        nav.enter(b);
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.active(), b);
        nav.back();
        assert_eq!(nav.active(), a);
        nav.back();
        assert_eq!(nav.active(), set.outer());
    }
}
