//! Config namespace: YAML runtime settings and the resolved service config.

mod service;
mod settings;

pub use service::{
    DEFAULT_BIND_ADDR, DEFAULT_EVEN_URL, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_FIBONACCI_URL,
    DEFAULT_PRIMES_URL, DEFAULT_RANDOM_URL, DEFAULT_RESPONSE_BUDGET_MS, ServiceConfig,
    UpstreamConfig,
};
pub use settings::{
    GatewaySettings, RuntimeSettings, UpstreamSettings, WindowSettings, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
