//! Fly camera and its per-frame input controller.
//!
//! # Invariants
//! - Motion is a direct additive step each frame; no interpolation state.
//! - Pitch is never clamped (the view can flip past the poles).
//! - Camera state lives outside the scene graph; rendering only reads it.

pub mod camera;
pub mod controller;

pub use camera::FlyCamera;
pub use controller::apply_input;
