//! Scene factories: pure constructors for the outer cluster and the two
//! inner void scenes. Deterministic given their input literals.

use crate::chart::StarChart;
use crate::graph::{Node, PointLight, Scene, Shape};
use crate::set::SceneSet;
use glam::Vec3;
use starlane_common::{Color, NodeId, Transform};

const STAR_RADIUS: f32 = 0.5;
const LANE_COLOR: Color = Color::WHITE;

/// Build the outer cluster scene from a chart. Returns the scene and the
/// star node ids in chart order, for portal registration.
pub fn outer_scene(chart: &StarChart) -> (Scene, Vec<NodeId>) {
    let mut scene = Scene::new("cluster");
    scene.add_light(PointLight::white(Vec3::new(10.0, 10.0, 10.0)));

    let star_ids: Vec<NodeId> = chart
        .stars
        .iter()
        .map(|star| {
            let node = Node::new(
                Shape::Sphere {
                    radius: STAR_RADIUS,
                },
                Transform::at(star.position),
                star.color,
            )
            .interactive(star.name.clone());
            scene.add_node(node)
        })
        .collect();

    for [a, b] in &chart.lanes {
        scene.link(star_ids[*a], star_ids[*b], LANE_COLOR);
    }

    (scene, star_ids)
}

/// One point light and one magenta sphere in an otherwise empty scene.
pub fn sphere_void() -> Scene {
    let mut scene = Scene::new("sphere-void");
    scene.add_light(PointLight::white(Vec3::new(5.0, 5.0, 5.0)));
    scene.add_node(Node::new(
        Shape::Sphere { radius: 0.5 },
        Transform::default(),
        Color::from_hex(0xff00ff),
    ));
    scene
}

/// One point light and one cyan torus in an otherwise empty scene.
pub fn torus_void() -> Scene {
    let mut scene = Scene::new("torus-void");
    scene.add_light(PointLight::white(Vec3::new(5.0, 5.0, 5.0)));
    scene.add_node(Node::new(
        Shape::Torus {
            radius: 0.5,
            tube: 0.2,
        },
        Transform::default(),
        Color::from_hex(0x00ffff),
    ));
    scene
}

/// Assemble the full scene set: outer cluster plus one inner scene per star,
/// alternating between the two void factories.
pub fn universe(chart: &StarChart) -> SceneSet {
    let (outer, star_ids) = outer_scene(chart);
    let mut set = SceneSet::new(outer);

    for (index, (star_id, star)) in star_ids.iter().zip(&chart.stars).enumerate() {
        let mut inner = if index % 2 == 0 {
            sphere_void()
        } else {
            torus_void()
        };
        inner.name = format!("{} interior", star.name);
        let scene_id = set.insert(inner);
        set.register_portal(*star_id, scene_id);
    }

    tracing::debug!(
        scenes = set.len(),
        portals = set.portal_count(),
        "universe assembled"
    );
    set
}
