//! HTTP license check client.
//!
//! One POST per call, no retries here: the [`Validator`](crate::Validator)
//! owns the retry policy.

use crate::error::{LicenseError, LicenseResult};
use crate::key::LicenseKey;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Definitive answer from the check endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Key is valid. `credits` is absent when the server omits the count.
    Valid { credits: Option<u32> },
    /// Key is invalid or exhausted.
    Invalid { message: Option<String> },
}

/// Something that can answer "is this key valid".
#[async_trait]
pub trait CheckClient: Send + Sync {
    /// Performs a single check round-trip.
    ///
    /// `Ok` carries a definitive answer. Errors for which
    /// [`LicenseError::is_transient`] holds are worth retrying.
    async fn check(&self, key: &LicenseKey) -> LicenseResult<CheckOutcome>;
}

#[derive(Debug, Serialize)]
struct CheckRequest<'a> {
    #[serde(rename = "licenseKey")]
    license_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(rename = "isValid", default)]
    is_valid: Option<serde_json::Value>,
    #[serde(default)]
    credits: Option<serde_json::Value>,
    #[serde(default)]
    sessions_remaining: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl CheckResponse {
    fn is_valid(&self) -> bool {
        matches!(self.is_valid, Some(serde_json::Value::Bool(true)))
    }

    /// A count of the wrong type reads as "unknown", not as a bad body.
    fn credits(&self) -> Option<u32> {
        [&self.credits, &self.sessions_remaining]
            .into_iter()
            .flatten()
            .find_map(count)
    }
}

fn count(value: &serde_json::Value) -> Option<u32> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then(|| n.max(0.0).min(f64::from(u32::MAX)) as u32)
}

/// [`CheckClient`] backed by the remote check endpoint.
pub struct HttpCheckClient {
    client: Client,
    endpoint: String,
}

impl HttpCheckClient {
    /// Default per-request timeout. Kept generous since the retry loop
    /// already bounds the total wait.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a client for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> LicenseResult<Self> {
        Self::with_timeout(endpoint, Self::DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom per-request timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> LicenseResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LicenseError::Client(e.to_string()))?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Wraps an existing `reqwest` client.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CheckClient for HttpCheckClient {
    async fn check(&self, key: &LicenseKey) -> LicenseResult<CheckOutcome> {
        debug!("Checking license key {}", key.masked());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CheckRequest {
                license_key: key.as_str(),
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(LicenseError::Server {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: CheckResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                debug!("Check rejected with HTTP {} and no JSON body", status);
                return Ok(CheckOutcome::Invalid { message: None });
            }
        };

        if status.is_success() && parsed.is_valid() {
            Ok(CheckOutcome::Valid {
                credits: parsed.credits(),
            })
        } else {
            debug!("Check rejected with HTTP {}", status);
            Ok(CheckOutcome::Invalid {
                message: parsed.message.filter(|m| !m.trim().is_empty()),
            })
        }
    }
}
