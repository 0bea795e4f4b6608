//! avgcalc-window: fixed-size sliding window of unique numbers.
//!
//! Ring buffer keyed by arrival order. Merging a batch collapses duplicates,
//! skips values already present and evicts the oldest entry when full.

mod average;
mod snapshot;
mod window;

pub use average::average;
pub use snapshot::WindowSnapshot;
pub use window::{DEFAULT_WINDOW_SIZE, NumberWindow};
