//! Average calculator service: per-category sliding windows fed by an upstream API.
//!
//! - `GET /numbers/{category}` fetches a batch under a deadline, merges it into the
//!   category window and returns previous/current state with the average.
//! - Upstream failures are soft: the window is left as is and the response carries `error`.

#![allow(missing_docs)]

mod category;
mod config;
mod error;
mod gateway;
mod handler;
mod observability;
mod store;
#[doc(hidden)]
pub mod test_support;
mod upstream;

pub use category::Category;
pub use config::{
    DEFAULT_BIND_ADDR, DEFAULT_EVEN_URL, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_FIBONACCI_URL,
    DEFAULT_PRIMES_URL, DEFAULT_RANDOM_URL, DEFAULT_RESPONSE_BUDGET_MS, GatewaySettings,
    RuntimeSettings, ServiceConfig, UpstreamConfig, UpstreamSettings, WindowSettings,
    load_runtime_settings, load_runtime_settings_from_paths, runtime_settings_paths,
    set_config_home_override,
};
pub use error::{AvgCalcError, InvalidCategory, Result};
pub use gateway::{ErrorResponse, GatewayHealthResponse, GatewayState, router, run_http};
pub use handler::{FETCH_FAILED_MESSAGE, INVALID_CATEGORY_MESSAGE, NumbersHandler, NumbersResponse};
pub use observability::GatewayEvent;
pub use store::WindowStore;
pub use upstream::{HttpNumberSource, NumberSource, parse_numbers_payload};
