//! Before/after view of one merge.

use serde::{Deserialize, Serialize};

/// Window contents captured around a single merge (oldest first).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct WindowSnapshot {
    /// Window state immediately before the merge.
    pub previous: Vec<i64>,
    /// Window state after every insertion of the merge.
    pub current: Vec<i64>,
}

impl WindowSnapshot {
    /// Snapshot where nothing changed: previous and current are the same state.
    pub fn unchanged(state: Vec<i64>) -> Self {
        Self {
            previous: state.clone(),
            current: state,
        }
    }

    /// True when the merge did not alter the window.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.previous == self.current
    }

    /// Values that entered the window during the merge, in insertion order.
    #[must_use]
    pub fn inserted(&self) -> Vec<i64> {
        self.current
            .iter()
            .filter(|value| !self.previous.contains(value))
            .copied()
            .collect()
    }
}
