//! Conversion history recovery.
//!
//! Lets a user get back download links for packs converted earlier with
//! the same license key.

use crate::client::{rejection, ApiConfig};
use crate::error::ApiResult;
use artypacks_license::LicenseKey;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One previously converted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub original_filename: String,
    pub download_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct HistoryRequest<'a> {
    #[serde(rename = "licenseKey")]
    license_key: &'a str,
}

/// Client for the history endpoint.
pub struct HistoryClient {
    client: Client,
    endpoint: String,
}

impl HistoryClient {
    pub fn new(endpoint: impl Into<String>, config: &ApiConfig) -> ApiResult<Self> {
        Ok(Self::with_client(config.build_client()?, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Fetches past conversions for `key`, newest first.
    pub async fn fetch(&self, key: &LicenseKey) -> ApiResult<Vec<HistoryEntry>> {
        debug!("Fetching conversion history for {}", key.masked());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&HistoryRequest {
                license_key: key.as_str(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response, "Could not load conversion history.").await);
        }

        let body = response.bytes().await?;
        let mut entries: Vec<HistoryEntry> = serde_json::from_slice(&body)?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }
}
