//! Shared types for the starlane viewer: ids, transforms, colors.
//!
//! # Invariants
//! - `NodeId` is globally unique and totally ordered (drives deterministic
//!   scene iteration).
//! - `Color` round-trips exactly through cache-and-restore.

pub mod color;
pub mod types;

pub use color::{Color, ColorParseError};
pub use types::{NodeId, Transform};
