//! Number window: bounded ring buffer of unique `i64` values.

use std::collections::{HashSet, VecDeque};

use crate::WindowSnapshot;

/// Window capacity used when none is configured.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Bounded window of unique numbers. Oldest first; the front is evicted when full.
#[derive(Debug, Clone)]
pub struct NumberWindow {
    ring: VecDeque<i64>,
    capacity: usize,
}

impl Default for NumberWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl NumberWindow {
    /// Create an empty window. A capacity of 0 is clamped to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ring: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Merge a fetched batch into the window.
    ///
    /// Repeated values inside `incoming` count once, values already present are skipped,
    /// and each new value evicts the oldest entry once the window is full. Values are
    /// applied in input order. Returns the state before and after the merge.
    pub fn merge(&mut self, incoming: &[i64]) -> WindowSnapshot {
        let previous = self.as_vec();
        let mut seen = HashSet::with_capacity(incoming.len());
        for &value in incoming {
            if !seen.insert(value) || self.contains(value) {
                continue;
            }
            if self.ring.len() == self.capacity {
                self.ring.pop_front();
            }
            self.ring.push_back(value);
        }
        WindowSnapshot {
            previous,
            current: self.as_vec(),
        }
    }

    /// Whether `value` is currently in the window.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.ring.contains(&value)
    }

    /// Copy of the window contents, oldest to newest.
    #[must_use]
    pub fn as_vec(&self) -> Vec<i64> {
        self.ring.iter().copied().collect()
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// True before the first number arrives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
