//! Shared HTTP client configuration.

use crate::error::{ApiError, ApiResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings shared by every API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Per-request timeout in seconds. Uploads of several brushsets to a
    /// cold backend can legitimately take minutes.
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            user_agent: format!("artypacks/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Builds a `reqwest` client with these settings.
    pub fn build_client(&self) -> ApiResult<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to create HTTP client: {e}")))
    }
}

/// Body shape of every error response: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Reads a non-2xx response into an `ApiError::Rejected`.
pub(crate) async fn rejection(response: reqwest::Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let body = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Rejected { status, message }
}
