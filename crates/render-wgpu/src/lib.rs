//! wgpu render backend for the starlane viewer.
//!
//! Draws a scene's shapes as instanced lit meshes and its hyperlanes as a
//! line list, through the fly camera's view-projection.
//!
//! # Invariants
//! - The renderer never mutates scene state.
//! - Meshes are unit-sized and placed per instance; only torus meshes are
//!   parameter-specific (cached by parameter pair).

mod gpu;
mod mesh;
mod shaders;

pub use gpu::WgpuRenderer;
