//! Window store: one `NumberWindow` per category, owned by the gateway state.
//! Each window sits behind its own mutex, so merges into one category are atomic
//! and categories never contend.

use std::sync::Arc;

use avgcalc_window::{DEFAULT_WINDOW_SIZE, NumberWindow, WindowSnapshot};
use tokio::sync::Mutex;

use crate::category::Category;

/// Process-lifetime windows for every category. Cheap to clone; clones share state.
#[derive(Clone, Debug)]
pub struct WindowStore {
    windows: Arc<[Mutex<NumberWindow>; Category::COUNT]>,
    window_size: usize,
}

impl Default for WindowStore {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl WindowStore {
    /// Empty windows of `window_size` entries each (0 is clamped to 1).
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            windows: Arc::new(std::array::from_fn(|_| {
                Mutex::new(NumberWindow::new(window_size))
            })),
            window_size,
        }
    }

    /// Merge a fetched batch into the category window; returns before/after state.
    pub async fn merge(&self, category: Category, incoming: &[i64]) -> WindowSnapshot {
        let mut window = self.windows[category.slot()].lock().await;
        window.merge(incoming)
    }

    /// Current contents of the category window, oldest first.
    pub async fn snapshot(&self, category: Category) -> Vec<i64> {
        self.windows[category.slot()].lock().await.as_vec()
    }

    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}
