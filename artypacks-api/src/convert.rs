//! Brushset conversion client.
//!
//! Uploads the selected files together with the license key as one
//! multipart request and returns the download link of the converted pack.

use crate::client::{rejection, ApiConfig};
use crate::error::{ApiError, ApiResult};
use artypacks_license::LicenseKey;
use artypacks_types::SelectedFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Multipart field carrying the license key.
pub const LICENSE_KEY_FIELD: &str = "licenseKey";

/// Multipart field carrying each uploaded file. Repeated once per file.
pub const FILES_FIELD: &str = "files";

const CONVERSION_FAILED: &str = "Conversion failed.";

/// A finished conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
}

/// Something that can convert brushsets.
#[async_trait]
pub trait ConvertClient: Send + Sync {
    /// Uploads `files` for conversion under `key`.
    ///
    /// Returns `ApiError::Cancelled` as soon as `token` is cancelled.
    async fn convert(
        &self,
        key: &LicenseKey,
        files: &[SelectedFile],
        token: &CancellationToken,
    ) -> ApiResult<Conversion>;
}

/// [`ConvertClient`] backed by the remote conversion endpoint.
pub struct HttpConvertClient {
    client: Client,
    endpoint: String,
}

impl HttpConvertClient {
    pub fn new(endpoint: impl Into<String>, config: &ApiConfig) -> ApiResult<Self> {
        Ok(Self::with_client(config.build_client()?, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(key: &LicenseKey, files: &[SelectedFile]) -> ApiResult<Form> {
        let mut form = Form::new().text(LICENSE_KEY_FIELD, key.as_str().to_string());
        for file in files {
            let part = Part::bytes(file.bytes().to_vec())
                .file_name(file.name().to_string())
                .mime_str("application/octet-stream")?;
            form = form.part(FILES_FIELD, part);
        }
        Ok(form)
    }

    async fn upload(&self, key: &LicenseKey, files: &[SelectedFile]) -> ApiResult<Conversion> {
        let total: u64 = files.iter().map(SelectedFile::size).sum();
        debug!("Uploading {} file(s), {} bytes", files.len(), total);

        let form = Self::build_form(key, files)?;
        let response = self.client.post(&self.endpoint).multipart(form).send().await?;

        if !response.status().is_success() {
            let err = rejection(response, CONVERSION_FAILED).await;
            warn!("Conversion rejected: {}", err);
            return Err(err);
        }

        let body = response.bytes().await?;
        let conversion: Conversion = serde_json::from_slice(&body)?;
        info!("Conversion finished for {} file(s)", files.len());
        Ok(conversion)
    }
}

#[async_trait]
impl ConvertClient for HttpConvertClient {
    async fn convert(
        &self,
        key: &LicenseKey,
        files: &[SelectedFile],
        token: &CancellationToken,
    ) -> ApiResult<Conversion> {
        if files.is_empty() {
            return Err(ApiError::Config("no files to convert".to_string()));
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Conversion upload cancelled");
                Err(ApiError::Cancelled)
            }
            result = self.upload(key, files) => result,
        }
    }
}
