//! Resolved service configuration: settings with every default filled in.

use std::time::Duration;

use avgcalc_window::DEFAULT_WINDOW_SIZE;

use crate::category::Category;

use super::RuntimeSettings;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9876";
/// Upstream fetch deadline; leaves headroom under the response budget.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 450;
/// Target total handling time. Exceeding it is logged, never enforced.
pub const DEFAULT_RESPONSE_BUDGET_MS: u64 = 500;

pub const DEFAULT_PRIMES_URL: &str = "https://20.244.56.144/evaluation-service/primes";
pub const DEFAULT_FIBONACCI_URL: &str = "https://20.244.56.144/evaluation-service/fibo";
pub const DEFAULT_EVEN_URL: &str = "https://20.244.56.144/evaluation-service/even";
pub const DEFAULT_RANDOM_URL: &str = "https://20.244.56.144/evaluation-service/rand";

/// Upstream endpoints and client options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub primes_url: String,
    pub fibonacci_url: String,
    pub even_url: String,
    pub random_url: String,
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
    pub auth_token: Option<String>,
}

impl UpstreamConfig {
    /// Endpoint serving numbers of `category`.
    #[must_use]
    pub fn url(&self, category: Category) -> &str {
        match category {
            Category::Primes => &self.primes_url,
            Category::Fibonacci => &self.fibonacci_url,
            Category::Even => &self.even_url,
            Category::Random => &self.random_url,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            primes_url: DEFAULT_PRIMES_URL.to_string(),
            fibonacci_url: DEFAULT_FIBONACCI_URL.to_string(),
            even_url: DEFAULT_EVEN_URL.to_string(),
            random_url: DEFAULT_RANDOM_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            accept_invalid_certs: false,
            auth_token: None,
        }
    }
}

/// Fully resolved configuration for one service process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub window_size: usize,
    pub response_budget: Duration,
    pub upstream: UpstreamConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            response_budget: Duration::from_millis(DEFAULT_RESPONSE_BUDGET_MS),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Fill unset settings with defaults. Blank strings count as unset; a window size of 0 becomes 1.
    #[must_use]
    pub fn from_settings(settings: &RuntimeSettings) -> Self {
        let defaults = Self::default();
        let upstream = &settings.upstream;
        Self {
            bind_addr: non_empty(settings.gateway.bind.as_deref()).unwrap_or(defaults.bind_addr),
            window_size: settings
                .window
                .size
                .unwrap_or(defaults.window_size)
                .max(1),
            response_budget: settings
                .gateway
                .response_budget_ms
                .map_or(defaults.response_budget, Duration::from_millis),
            upstream: UpstreamConfig {
                primes_url: non_empty(upstream.primes_url.as_deref())
                    .unwrap_or(defaults.upstream.primes_url),
                fibonacci_url: non_empty(upstream.fibonacci_url.as_deref())
                    .unwrap_or(defaults.upstream.fibonacci_url),
                even_url: non_empty(upstream.even_url.as_deref())
                    .unwrap_or(defaults.upstream.even_url),
                random_url: non_empty(upstream.random_url.as_deref())
                    .unwrap_or(defaults.upstream.random_url),
                timeout: upstream
                    .timeout_ms
                    .map_or(defaults.upstream.timeout, Duration::from_millis),
                accept_invalid_certs: upstream
                    .accept_invalid_certs
                    .unwrap_or(defaults.upstream.accept_invalid_certs),
                auth_token: non_empty(upstream.auth_token.as_deref()),
            },
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
