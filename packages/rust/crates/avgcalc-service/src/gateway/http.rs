//! HTTP gateway: GET /numbers/{category} → window update → JSON response.
//!
//! 400 for an unknown category; upstream failures still answer 200 with an
//! `error` field and the unchanged window.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::category::Category;
use crate::error::InvalidCategory;
use crate::handler::{INVALID_CATEGORY_MESSAGE, NumbersHandler, NumbersResponse, millis};
use crate::observability::GatewayEvent;

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct GatewayState {
    pub handler: Arc<NumbersHandler>,
}

/// Response body for the health endpoint.
#[derive(Debug, Serialize)]
pub struct GatewayHealthResponse {
    pub status: &'static str,
    pub window_size: usize,
    pub fetch_timeout_ms: u64,
    pub response_budget_ms: u64,
    pub categories: [Category; Category::COUNT],
}

fn rejection(_: InvalidCategory) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: INVALID_CATEGORY_MESSAGE.to_string(),
        }),
    )
}

async fn handle_numbers(
    State(state): State<GatewayState>,
    Path(category): Path<String>,
) -> Result<Json<NumbersResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .handler
        .handle(&category)
        .await
        .map(Json)
        .map_err(rejection)
}

async fn handle_health(State(state): State<GatewayState>) -> Json<GatewayHealthResponse> {
    let handler = &state.handler;
    Json(GatewayHealthResponse {
        status: "healthy",
        window_size: handler.store().window_size(),
        fetch_timeout_ms: millis(handler.fetch_timeout()),
        response_budget_ms: millis(handler.response_budget()),
        categories: Category::ALL,
    })
}

/// Build the gateway router (GET /numbers/{category}, GET /health).
pub fn router(handler: NumbersHandler) -> Router {
    let state = GatewayState {
        handler: Arc::new(handler),
    };
    Router::new()
        .route("/health", get(handle_health))
        .route("/numbers/{category}", get(handle_numbers))
        .with_state(state)
}

/// Run the HTTP server; binds to `bind_addr` (e.g. `0.0.0.0:9876`).
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix); in-flight requests complete before exit.
pub async fn run_http(handler: NumbersHandler, bind_addr: &str) -> Result<()> {
    let window_size = handler.store().window_size();
    let fetch_timeout_ms = millis(handler.fetch_timeout());
    let app = router(handler);
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind gateway on {bind_addr}"))?;
    tracing::info!(
        event = GatewayEvent::GatewayListening.as_str(),
        bind_addr,
        window_size,
        fetch_timeout_ms,
        "gateway listening (Ctrl+C/SIGTERM to stop)"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!(event = GatewayEvent::GatewayStopped.as_str(), "gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::warn!(error = %error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
