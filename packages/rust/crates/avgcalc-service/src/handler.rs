//! Request handler for `GET /numbers/{category}`.
//!
//! Validate the category, fetch under a deadline, merge into the store and
//! average. Upstream failures of any kind leave the window untouched and are
//! reported inside a successful response.

use std::sync::Arc;
use std::time::{Duration, Instant};

use avgcalc_window::{WindowSnapshot, average};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::config::ServiceConfig;
use crate::error::{AvgCalcError, InvalidCategory, Result};
use crate::observability::GatewayEvent;
use crate::store::WindowStore;
use crate::upstream::{HttpNumberSource, NumberSource};

/// Client-facing message for an unknown category (HTTP 400).
pub const INVALID_CATEGORY_MESSAGE: &str = "Invalid number ID";
/// Client-facing message for any upstream failure (HTTP 200).
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch numbers or request timed out";

/// Response body of `/numbers/{category}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumbersResponse {
    pub window_prev_state: Vec<i64>,
    pub window_curr_state: Vec<i64>,
    /// Numbers as returned by the upstream, duplicates included. Empty on soft failure.
    pub numbers: Vec<i64>,
    pub avg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NumbersResponse {
    fn fetched(snapshot: WindowSnapshot, numbers: Vec<i64>) -> Self {
        let avg = average(&snapshot.current);
        Self {
            window_prev_state: snapshot.previous,
            window_curr_state: snapshot.current,
            numbers,
            avg,
            error: None,
        }
    }

    fn soft_failure(current: Vec<i64>) -> Self {
        let avg = average(&current);
        let snapshot = WindowSnapshot::unchanged(current);
        Self {
            window_prev_state: snapshot.previous,
            window_curr_state: snapshot.current,
            numbers: Vec::new(),
            avg,
            error: Some(FETCH_FAILED_MESSAGE.to_string()),
        }
    }

}

/// Handles number requests against one store and one upstream source.
pub struct NumbersHandler {
    store: WindowStore,
    source: Arc<dyn NumberSource>,
    fetch_timeout: Duration,
    response_budget: Duration,
}

impl NumbersHandler {
    pub fn new(
        store: WindowStore,
        source: Arc<dyn NumberSource>,
        fetch_timeout: Duration,
        response_budget: Duration,
    ) -> Self {
        Self {
            store,
            source,
            fetch_timeout,
            response_budget,
        }
    }

    /// Production wiring: fresh store plus HTTP upstream from resolved config.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let source = HttpNumberSource::new(config.upstream.clone())?;
        Ok(Self::new(
            WindowStore::new(config.window_size),
            Arc::new(source),
            config.upstream.timeout,
            config.response_budget,
        ))
    }

    #[must_use]
    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    #[must_use]
    pub fn response_budget(&self) -> Duration {
        self.response_budget
    }

    /// Serve one request for `raw_category`.
    ///
    /// An unknown category is rejected before any fetch or store access. Upstream
    /// failures are folded into the response and never surface as `Err`.
    pub async fn handle(
        &self,
        raw_category: &str,
    ) -> std::result::Result<NumbersResponse, InvalidCategory> {
        let started = Instant::now();
        let category = match Category::parse(raw_category) {
            Ok(category) => category,
            Err(error) => {
                tracing::info!(
                    event = GatewayEvent::InvalidCategory.as_str(),
                    requested = raw_category,
                    "invalid number id requested"
                );
                return Err(error);
            }
        };

        let response = match self.fetch_bounded(category).await {
            Ok(numbers) => {
                let snapshot = self.store.merge(category, &numbers).await;
                let inserted = snapshot.inserted().len();
                let window_changed = !snapshot.is_unchanged();
                let response = NumbersResponse::fetched(snapshot, numbers);
                tracing::info!(
                    event = GatewayEvent::NumbersFetched.as_str(),
                    %category,
                    fetched = response.numbers.len(),
                    inserted,
                    window_changed,
                    window_len = response.window_curr_state.len(),
                    avg = response.avg,
                    elapsed_ms = started.elapsed().as_millis(),
                    "numbers merged into window"
                );
                response
            }
            Err(error) => {
                let current = self.store.snapshot(category).await;
                tracing::warn!(
                    event = GatewayEvent::NumbersSoftFailure.as_str(),
                    %category,
                    kind = error.kind(),
                    error = %error,
                    window_len = current.len(),
                    elapsed_ms = started.elapsed().as_millis(),
                    "upstream fetch failed; window unchanged"
                );
                NumbersResponse::soft_failure(current)
            }
        };

        let elapsed = started.elapsed();
        if elapsed > self.response_budget {
            tracing::warn!(
                event = GatewayEvent::BudgetExceeded.as_str(),
                %category,
                elapsed_ms = elapsed.as_millis(),
                budget_ms = self.response_budget.as_millis(),
                "request exceeded response budget"
            );
        }
        Ok(response)
    }

    /// Fetch with the deadline applied. On expiry the fetch future is dropped,
    /// which cancels the in-flight request; a late result is never observed.
    async fn fetch_bounded(&self, category: Category) -> Result<Vec<i64>> {
        match tokio::time::timeout(self.fetch_timeout, self.source.fetch(category)).await {
            Ok(result) => result,
            Err(_) => Err(AvgCalcError::UpstreamTimeout {
                timeout_ms: millis(self.fetch_timeout),
            }),
        }
    }
}

/// Whole milliseconds of `duration`, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
