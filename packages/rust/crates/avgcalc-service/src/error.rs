//! Error types for the number window service.
//!
//! Library code returns these; the binary wraps them with `anyhow`.

use thiserror::Error;

/// Category id is not one of the known number sources (HTTP 400).
///
/// Raised before any fetch or store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid number id: {0:?}")]
pub struct InvalidCategory(pub String);

/// Upstream fetch failures.
///
/// None of these reaches the caller as a request failure: each is reported as a
/// soft failure with the window left untouched.
#[derive(Debug, Error)]
pub enum AvgCalcError {
    /// Upstream did not answer within the fetch deadline.
    #[error("upstream request timed out after {timeout_ms} ms")]
    UpstreamTimeout {
        /// Deadline that elapsed.
        timeout_ms: u64,
    },

    /// Connection, status or body read failure.
    #[error("upstream transport error: {0}")]
    UpstreamTransport(String),

    /// Body was not a list of whole numbers (bare or under `numbers`).
    #[error("upstream payload malformed: {0}")]
    UpstreamFormat(String),
}

impl AvgCalcError {
    /// Stable short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamTimeout { .. } => "upstream_timeout",
            Self::UpstreamTransport(_) => "upstream_transport",
            Self::UpstreamFormat(_) => "upstream_format",
        }
    }
}

impl From<reqwest::Error> for AvgCalcError {
    fn from(error: reqwest::Error) -> Self {
        Self::UpstreamTransport(error.to_string())
    }
}

/// Result alias for upstream operations.
pub type Result<T> = std::result::Result<T, AvgCalcError>;
