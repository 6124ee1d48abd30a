//! Input tracking: raw key/pointer events become shared logical state.
//!
//! # Invariants
//! - Consumers read `InputState`, never raw platform events.
//! - Mouse NDC is recomputed from the viewport size at event time.
//! - Unrecognized keys never enter the tracker.

pub mod state;

pub use state::{InputState, Key, ndc_from_pixels};
