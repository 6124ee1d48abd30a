//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate scene state.
//! - Render output derives only from the scene and the view.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
