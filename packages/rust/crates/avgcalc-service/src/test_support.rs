//! Test-only number sources for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::category::Category;
use crate::error::{AvgCalcError, Result};
use crate::upstream::NumberSource;

/// Scripted upstream behavior.
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// Return these numbers for every category.
    Numbers(Vec<i64>),
    /// Sleep, then return the numbers.
    Slow(Duration, Vec<i64>),
    /// Fail with a transport error.
    Transport,
    /// Fail with a format error.
    Format,
}

/// `NumberSource` that follows a script and counts calls.
#[derive(Debug, Clone)]
pub struct FakeNumberSource {
    behavior: FakeBehavior,
    calls: Arc<AtomicUsize>,
}

impl FakeNumberSource {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn numbers(numbers: &[i64]) -> Self {
        Self::new(FakeBehavior::Numbers(numbers.to_vec()))
    }

    /// Number of `fetch` calls so far (shared across clones).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NumberSource for FakeNumberSource {
    async fn fetch(&self, _category: Category) -> Result<Vec<i64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            FakeBehavior::Numbers(numbers) => Ok(numbers.clone()),
            FakeBehavior::Slow(delay, numbers) => {
                tokio::time::sleep(*delay).await;
                Ok(numbers.clone())
            }
            FakeBehavior::Transport => Err(AvgCalcError::UpstreamTransport(
                "connection refused".to_string(),
            )),
            FakeBehavior::Format => Err(AvgCalcError::UpstreamFormat(
                "expected array or object, got string".to_string(),
            )),
        }
    }
}
