//! Scene graph kernel: authoritative scene state, factories, chart config.
//!
//! # Invariants
//! - Node iteration order is deterministic (BTreeMap keyed by NodeId).
//! - Hover tinting always caches the color it replaces; clearing restores
//!   the cached value exactly.
//! - Scenes are retained for the session; switching render targets never
//!   destroys a scene.

pub mod chart;
pub mod factory;
pub mod graph;
pub mod set;

pub use chart::{ChartError, StarChart, StarSpec};
pub use graph::{Node, PointLight, Scene, Shape};
pub use set::{SceneId, SceneSet};
