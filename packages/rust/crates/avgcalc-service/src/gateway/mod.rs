//! Gateway namespace: HTTP entrypoint.

mod http;

pub use http::{ErrorResponse, GatewayHealthResponse, GatewayState, router, run_http};
