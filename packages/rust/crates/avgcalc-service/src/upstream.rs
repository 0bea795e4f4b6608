//! Upstream number sources.
//!
//! `NumberSource` is the seam the handler fetches through; `HttpNumberSource`
//! is the production implementation (one GET per category URL).

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::category::Category;
use crate::config::UpstreamConfig;
use crate::error::{AvgCalcError, Result};
use crate::handler::millis;
use crate::observability::GatewayEvent;

/// Fetches the current batch of numbers for a category.
#[async_trait]
pub trait NumberSource: Send + Sync {
    /// One fetch. Implementations need not enforce the deadline; the handler does.
    async fn fetch(&self, category: Category) -> Result<Vec<i64>>;
}

/// HTTP GET against the configured category URLs.
pub struct HttpNumberSource {
    client: Client,
    config: UpstreamConfig,
}

impl HttpNumberSource {
    /// Build the client. The request timeout mirrors the handler deadline.
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self { client, config })
    }

    /// Endpoint used for `category`.
    #[must_use]
    pub fn url(&self, category: Category) -> &str {
        self.config.url(category)
    }
}

#[async_trait]
impl NumberSource for HttpNumberSource {
    async fn fetch(&self, category: Category) -> Result<Vec<i64>> {
        let started = Instant::now();
        let url = self.url(category);
        let mut request = self.client.get(url);
        if let Some(token) = self.config.auth_token.as_deref() {
            request = request.bearer_auth(token);
        }
        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(error) => {
                tracing::debug!(
                    event = GatewayEvent::UpstreamRequestFailed.as_str(),
                    %category,
                    url,
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %error,
                    "upstream request failed"
                );
                if error.is_timeout() {
                    return Err(AvgCalcError::UpstreamTimeout {
                        timeout_ms: millis(self.config.timeout),
                    });
                }
                return Err(error.into());
            }
        };
        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(
                event = GatewayEvent::UpstreamNonSuccessStatus.as_str(),
                %category,
                status = %status,
                elapsed_ms = started.elapsed().as_millis(),
                "upstream returned non-success status"
            );
            return Err(AvgCalcError::UpstreamTransport(format!(
                "upstream returned status {status}"
            )));
        }
        let body = resp.bytes().await?;
        let numbers = match serde_json::from_slice::<Value>(&body)
            .map_err(|error| AvgCalcError::UpstreamFormat(format!("body is not json: {error}")))
            .and_then(|value| parse_numbers_payload(&value))
        {
            Ok(numbers) => numbers,
            Err(error) => {
                tracing::debug!(
                    event = GatewayEvent::UpstreamDecodeFailed.as_str(),
                    %category,
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %error,
                    "upstream payload decode failed"
                );
                return Err(error);
            }
        };
        tracing::debug!(
            event = GatewayEvent::UpstreamCompleted.as_str(),
            %category,
            elapsed_ms = started.elapsed().as_millis(),
            count = numbers.len(),
            "upstream fetch completed"
        );
        Ok(numbers)
    }
}

/// Accept a bare array of numbers or an object holding one under `numbers`.
/// Whole-number floats (`2.0`) are taken as the integer they denote.
pub fn parse_numbers_payload(value: &Value) -> Result<Vec<i64>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("numbers") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(AvgCalcError::UpstreamFormat(
                    "`numbers` is not an array".to_string(),
                ));
            }
            None => {
                return Err(AvgCalcError::UpstreamFormat(
                    "object has no `numbers` field".to_string(),
                ));
            }
        },
        other => {
            return Err(AvgCalcError::UpstreamFormat(format!(
                "expected array or object, got {}",
                json_kind(other)
            )));
        }
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            as_whole_number(item).ok_or_else(|| {
                AvgCalcError::UpstreamFormat(format!(
                    "entry {index} is not a whole number: {}",
                    json_kind(item)
                ))
            })
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn as_whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    // -2^63 and 2^63 are exact as f64; the cast below is lossless inside that range.
    let bound = -(i64::MIN as f64);
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= -bound && *f < bound)
        .map(|f| f as i64)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "fractional or out-of-range float",
        Value::Number(_) => "out-of-range integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
