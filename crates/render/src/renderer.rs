use glam::Vec3;
use starlane_scene::{Scene, Shape};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl RenderView {
    pub fn looking(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            ..Self::default()
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a scene and a view and produces output; it never mutates
/// the scene. Keeping the seam here lets tests and the CLI run the whole
/// interaction stack without a GPU.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the given scene from the given view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Headless text renderer.
///
/// Produces a human-readable description of the scene, used by the CLI and
/// by tests that assert on render input without a GPU device.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn shape_tag(shape: &Shape) -> &'static str {
    match shape {
        Shape::Sphere { .. } => "sphere",
        Shape::Cube { .. } => "cube",
        Shape::Torus { .. } => "torus",
        Shape::Lines { .. } => "lines",
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene '{}' ({} nodes, {} lights) ===\n",
            scene.name,
            scene.node_count(),
            scene.lights().len()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for (id, node) in scene.nodes() {
            let p = node.transform.position;
            let hover = if node.is_hovered() { " [hover]" } else { "" };
            let label = node
                .label
                .as_deref()
                .map(|l| format!(" \"{l}\""))
                .unwrap_or_default();
            out.push_str(&format!(
                "  [{:.8}] {} pos=({:.2}, {:.2}, {:.2}) color=#{:06x}{}{}\n",
                &id.0.to_string()[..8],
                shape_tag(&node.shape),
                p.x,
                p.y,
                p.z,
                node.color.to_hex(),
                label,
                hover,
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlane_common::{Color, Transform};
    use starlane_scene::Node;

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::new("void");
        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());
        assert!(output.contains("Scene 'void'"));
        assert!(output.contains("0 nodes"));
    }

    #[test]
    fn debug_renderer_lists_nodes_with_colors() {
        let mut scene = Scene::new("test");
        scene.add_node(
            Node::new(
                Shape::Sphere { radius: 0.5 },
                Transform::at(Vec3::new(1.0, 2.0, 3.0)),
                Color::from_hex(0x00ff00),
            )
            .interactive("Beta"),
        );

        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());
        assert!(output.contains("sphere"));
        assert!(output.contains("#00ff00"));
        assert!(output.contains("\"Beta\""));
        assert!(!output.contains("[hover]"));
    }

    #[test]
    fn debug_renderer_marks_hover() {
        let mut scene = Scene::new("test");
        let id = scene.add_node(
            Node::new(
                Shape::Sphere { radius: 0.5 },
                Transform::default(),
                Color::WHITE,
            )
            .interactive("Alpha"),
        );
        scene.set_hover(id);
        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());
        assert!(output.contains("[hover]"));
        // The tint is visible in the dump as well.
        assert!(output.contains("#ff0000"));
    }

    #[test]
    fn render_view_looking_sets_endpoints() {
        let view = RenderView::looking(Vec3::ONE, Vec3::ZERO);
        assert_eq!(view.eye, Vec3::ONE);
        assert_eq!(view.target, Vec3::ZERO);
        assert_eq!(view.fov_degrees, 75.0);
    }
}
