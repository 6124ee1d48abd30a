//! Ray picking and hover resolution against scene graphs.
//!
//! # Invariants
//! - A cast returns hits ordered nearest-first.
//! - After hover resolution at most one node is tinted, and every node the
//!   previous frame tinted has its cached color back.
//! - An empty hit list is a normal outcome, not an error.

pub mod ray;
pub mod resolver;

pub use ray::Ray;
pub use resolver::{Hit, Hover, cast, cast_screen, resolve_hover};
