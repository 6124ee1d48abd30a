//! Developer tooling: read-only scene/navigation inspection.
//!
//! # Invariants
//! - Tools never mutate what they inspect.

mod inspector;

pub use inspector::{NavSummary, SceneInfo, SceneInspector};
