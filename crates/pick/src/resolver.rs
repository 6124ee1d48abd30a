use crate::ray::Ray;
use glam::{Vec2, Vec3};
use starlane_camera::FlyCamera;
use starlane_common::NodeId;
use starlane_scene::{Scene, Shape};

/// One intersection from a cast, ordered nearest-first in the result list.
#[derive(Debug, Clone)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    /// World-space intersection point.
    pub point: Vec3,
}

/// Intersect a ray against every interactive node of a scene.
///
/// Returns hits sorted nearest-first; ties keep NodeId order (the scene
/// iterates deterministically and the sort is stable). Lines and tori are
/// decoration and are never tested.
pub fn cast(scene: &Scene, ray: &Ray) -> Vec<Hit> {
    let mut hits: Vec<Hit> = scene
        .interactive_nodes()
        .filter_map(|(id, node)| {
            let center = node.transform.position;
            let scale = node.transform.scale.x;
            let distance = match node.shape {
                Shape::Sphere { radius } => ray.intersect_sphere(center, radius * scale),
                Shape::Cube { half_extent } => {
                    let half = Vec3::splat(half_extent * scale);
                    ray.intersect_aabb(center - half, center + half)
                }
                Shape::Torus { .. } | Shape::Lines { .. } => None,
            }?;
            Some(Hit {
                node: *id,
                distance,
                point: ray.point_at(distance),
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Convenience: cast through a screen position.
pub fn cast_screen(scene: &Scene, camera: &FlyCamera, ndc: Vec2) -> Vec<Hit> {
    cast(scene, &Ray::from_screen(ndc, camera))
}

/// Resolved hover for one frame: the tinted node and its label text.
#[derive(Debug, Clone, PartialEq)]
pub struct Hover {
    pub node: NodeId,
    pub label: Option<String>,
}

/// Apply the per-frame hover policy to a scene.
///
/// Every previously hovered node is unconditionally restored to its cached
/// color first, then the nearest hit (if any) is tinted. At most one node is
/// hovered after this returns, and no stale tint can survive a frame.
pub fn resolve_hover(scene: &mut Scene, hits: &[Hit]) -> Option<Hover> {
    scene.clear_hover();
    let nearest = hits.first()?;
    scene.set_hover(nearest.node);
    let label = scene.node(nearest.node).and_then(|n| n.label.clone());
    Some(Hover {
        node: nearest.node,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlane_common::{Color, Transform};
    use starlane_scene::Node;

    fn sphere_at(scene: &mut Scene, position: Vec3, hex: u32, label: &str) -> NodeId {
        scene.add_node(
            Node::new(
                Shape::Sphere { radius: 0.5 },
                Transform::at(position),
                Color::from_hex(hex),
            )
            .interactive(label),
        )
    }

    fn scene_with_two_spheres() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new("test");
        let near = sphere_at(&mut scene, Vec3::new(0.0, 0.0, 5.0), 0xff0000, "near");
        let far = sphere_at(&mut scene, Vec3::new(0.0, 10.0, 5.0), 0x00ff00, "far");
        (scene, near, far)
    }

    #[test]
    fn cast_hits_only_the_intersected_sphere() {
        let (scene, near, _far) = scene_with_two_spheres();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hits = cast(&scene, &ray);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, near);
        assert!((hits[0].distance - 4.5).abs() < 1e-4);
    }

    #[test]
    fn cast_orders_hits_nearest_first() {
        let mut scene = Scene::new("test");
        let far = sphere_at(&mut scene, Vec3::new(0.0, 0.0, 9.0), 0xff0000, "far");
        let near = sphere_at(&mut scene, Vec3::new(0.0, 0.0, 3.0), 0x00ff00, "near");
        let hits = cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, near);
        assert_eq!(hits[1].node, far);
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn cast_skips_non_interactive_nodes() {
        let mut scene = Scene::new("test");
        // Pickable shape but not flagged interactive.
        scene.add_node(Node::new(
            Shape::Sphere { radius: 0.5 },
            Transform::at(Vec3::new(0.0, 0.0, 5.0)),
            Color::WHITE,
        ));
        assert!(cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z)).is_empty());
    }

    #[test]
    fn cast_picks_cubes_by_aabb() {
        let mut scene = Scene::new("test");
        let cube = scene.add_node(
            Node::new(
                Shape::Cube { half_extent: 0.5 },
                Transform::at(Vec3::new(0.0, 0.0, 4.0)),
                Color::WHITE,
            )
            .interactive("box"),
        );
        let hits = cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, cube);
        assert!((hits[0].distance - 3.5).abs() < 1e-4);
    }

    #[test]
    fn hover_tints_hit_and_leaves_other_untouched() {
        let (mut scene, near, far) = scene_with_two_spheres();
        let far_color = scene.node(far).unwrap().color;

        let hits = cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        let hover = resolve_hover(&mut scene, &hits).unwrap();
        assert_eq!(hover.node, near);
        assert_eq!(hover.label.as_deref(), Some("near"));
        assert_eq!(scene.node(near).unwrap().color, Color::HIGHLIGHT);
        assert_eq!(scene.node(far).unwrap().color, far_color);
    }

    #[test]
    fn hover_round_trip_restores_exact_color() {
        let (mut scene, near, _far) = scene_with_two_spheres();
        let original = scene.node(near).unwrap().color;

        let hits = cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        resolve_hover(&mut scene, &hits);
        assert_eq!(scene.node(near).unwrap().color, Color::HIGHLIGHT);

        // Next frame: the ray misses everything.
        let miss = cast(&scene, &Ray::new(Vec3::ZERO, -Vec3::Z));
        assert!(resolve_hover(&mut scene, &miss).is_none());
        assert_eq!(scene.node(near).unwrap().color, original);
        assert_eq!(scene.hovered(), None);
    }

    #[test]
    fn hover_moves_between_nodes_without_stale_tint() {
        let (mut scene, near, far) = scene_with_two_spheres();
        let near_color = scene.node(near).unwrap().color;

        let hits = cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        resolve_hover(&mut scene, &hits);

        // Ray now aimed at the other sphere.
        let hits = cast(&scene, &Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::Z));
        let hover = resolve_hover(&mut scene, &hits).unwrap();
        assert_eq!(hover.node, far);
        assert_eq!(scene.node(near).unwrap().color, near_color);
        assert_eq!(scene.node(far).unwrap().color, Color::HIGHLIGHT);
    }

    #[test]
    fn cast_screen_through_center_hits_star_ahead() {
        let mut scene = Scene::new("test");
        let star = sphere_at(&mut scene, Vec3::new(0.0, 0.0, -5.0), 0x0000ff, "ahead");
        let camera = FlyCamera {
            position: Vec3::ZERO,
            ..FlyCamera::default()
        };
        let hits = cast_screen(&scene, &camera, Vec2::ZERO);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, star);
        assert!((hits[0].point.z - -4.5).abs() < 1e-3);
    }
}
