//! Scene navigation: which scene is the render target, and how to move
//! between them.
//!
//! # Invariants
//! - Exactly one scene is active at any time.
//! - Every transition into an inner scene has a matching return transition.
//! - Navigation never destroys scenes; it only selects among them.

pub mod navigator;

pub use navigator::SceneNavigator;
