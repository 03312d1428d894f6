//! Order submission
//!
//! Submission is a single request/response exchange. The payload handed to
//! a submitter is already a snapshot, so nothing here can reach back into
//! the plate. Failures are returned to the caller, who may retry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assembler::OrderPayload;
use crate::config::SubmitConfig;
use crate::error::{PlateError, Result};

/// Acknowledgement of an accepted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Local id for this submission attempt
    pub submission_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    /// Number of order lines sent
    pub line_count: usize,
    /// Response body from the endpoint, `null` if it was not JSON
    #[serde(default)]
    pub response: serde_json::Value,
}

impl OrderReceipt {
    pub fn new(payload: &OrderPayload, response: serde_json::Value) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            line_count: payload.layers.len(),
            response,
        }
    }
}

/// Something that can deliver an order
pub trait OrderSubmitter {
    fn submit(&self, payload: &OrderPayload) -> Result<OrderReceipt>;
}

/// Posts orders as JSON to the configured endpoint
#[derive(Debug, Clone)]
pub struct HttpOrderSubmitter {
    config: SubmitConfig,
}

impl HttpOrderSubmitter {
    pub fn new(config: SubmitConfig) -> Self {
        Self { config }
    }
}

#[cfg(feature = "http")]
impl OrderSubmitter for HttpOrderSubmitter {
    fn submit(&self, payload: &OrderPayload) -> Result<OrderReceipt> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(self.config.timeout_ms))
            .build()
            .map_err(|e| PlateError::SubmissionFailed {
                reason: e.to_string(),
            })?;

        tracing::info!(
            endpoint = %self.config.endpoint,
            lines = payload.layers.len(),
            "Submitting order"
        );

        let response = client
            .post(&self.config.endpoint)
            .json(payload)
            .send()
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    format!("No response within {} ms", self.config.timeout_ms)
                } else if e.is_connect() {
                    format!("Cannot connect to {}: {}", self.config.endpoint, e)
                } else {
                    e.to_string()
                };
                tracing::warn!(%reason, "Order submission failed");
                PlateError::SubmissionFailed { reason }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Order endpoint rejected the order");
            return Err(PlateError::SubmissionRejected {
                status: status.as_u16(),
            });
        }

        let body = response.json::<serde_json::Value>().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Order response was not JSON");
            serde_json::Value::Null
        });
        Ok(OrderReceipt::new(payload, body))
    }
}

#[cfg(not(feature = "http"))]
impl OrderSubmitter for HttpOrderSubmitter {
    fn submit(&self, _payload: &OrderPayload) -> Result<OrderReceipt> {
        Err(PlateError::SubmissionFailed {
            reason: format!(
                "Built without the 'http' feature, cannot reach {}",
                self.config.endpoint
            ),
        })
    }
}
