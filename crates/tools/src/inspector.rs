use starlane_nav::SceneNavigator;
use starlane_scene::{Scene, SceneSet};

/// Read-only queries over the scene set for the HUD and CLI.
pub struct SceneInspector;

impl SceneInspector {
    /// Summarize the session: active scene, navigation depth, hover.
    pub fn summary(set: &SceneSet, nav: &SceneNavigator) -> NavSummary {
        let active = set.get(nav.active());
        NavSummary {
            active_scene: active.map(|s| s.name.clone()).unwrap_or_default(),
            depth: nav.depth(),
            scene_count: set.len(),
            portal_count: set.portal_count(),
            hovered_label: active.and_then(Self::hovered_label),
        }
    }

    /// Display text of the hovered node, if a node is hovered and has one.
    pub fn hovered_label(scene: &Scene) -> Option<String> {
        let id = scene.hovered()?;
        scene.node(id)?.label.clone()
    }

    /// Per-scene counts.
    pub fn describe(scene: &Scene) -> SceneInfo {
        SceneInfo {
            name: scene.name.clone(),
            nodes: scene.node_count(),
            interactive: scene.interactive_nodes().count(),
            lights: scene.lights().len(),
        }
    }
}

/// Session summary for overlays and logs.
#[derive(Debug, Clone)]
pub struct NavSummary {
    pub active_scene: String,
    pub depth: usize,
    pub scene_count: usize,
    pub portal_count: usize,
    pub hovered_label: Option<String>,
}

impl std::fmt::Display for NavSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scene={} depth={} scenes={} portals={}",
            self.active_scene, self.depth, self.scene_count, self.portal_count
        )?;
        if let Some(label) = &self.hovered_label {
            write!(f, " hover={label}")?;
        }
        Ok(())
    }
}

/// Counts for a single scene.
#[derive(Debug, Clone)]
pub struct SceneInfo {
    pub name: String,
    pub nodes: usize,
    pub interactive: usize,
    pub lights: usize,
}

impl std::fmt::Display for SceneInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}': {} nodes ({} interactive), {} lights",
            self.name, self.nodes, self.interactive, self.lights
        )
    }
}
