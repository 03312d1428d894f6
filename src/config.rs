//! Runtime configuration
//!
//! Resolution order: explicit value (CLI flag) > environment variable > default.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{PlateError, Result};

/// Order endpoint URL
pub const ORDER_API_URL_VAR: &str = "PLATED_ORDER_API_URL";
/// Submission timeout in milliseconds
pub const ORDER_TIMEOUT_VAR: &str = "PLATED_ORDER_TIMEOUT_MS";
/// Identity of the signed-in user
pub const USER_ID_VAR: &str = "PLATED_USER_ID";

pub const DEFAULT_ORDER_API_URL: &str = "http://localhost:5000/api/order";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Where and how orders are submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl SubmitConfig {
    pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_ms,
        }
    }

    /// Read the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let endpoint = env::var(ORDER_API_URL_VAR).unwrap_or_else(|_| DEFAULT_ORDER_API_URL.into());
        let timeout_ms = match env::var(ORDER_TIMEOUT_VAR) {
            Ok(raw) => raw.trim().parse().map_err(|_| PlateError::Config {
                reason: format!("{} must be a number of milliseconds, got '{}'", ORDER_TIMEOUT_VAR, raw),
            })?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };
        Self::new(endpoint, timeout_ms).validated()
    }

    /// Apply explicit overrides on top of this config
    pub fn with_overrides(mut self, endpoint: Option<String>, timeout_ms: Option<u64>) -> Result<Self> {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(timeout_ms) = timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        self.validated()
    }

    fn validated(self) -> Result<Self> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(PlateError::Config {
                reason: format!("Order endpoint must be an http(s) URL: {}", self.endpoint),
            });
        }
        if self.timeout_ms == 0 {
            return Err(PlateError::Config {
                reason: "Submission timeout must be positive".to_string(),
            });
        }
        Ok(self)
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_API_URL, DEFAULT_TIMEOUT_MS)
    }
}

/// User identity from the environment, if one is set
pub fn user_id_from_env() -> Option<String> {
    env::var(USER_ID_VAR).ok().filter(|id| !id.trim().is_empty())
}
