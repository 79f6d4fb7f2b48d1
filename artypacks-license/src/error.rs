//! Error types for the licensing module.

use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Key too short to be worth a round-trip.
    #[error("license key too short (minimum {min} characters)")]
    KeyTooShort { min: usize },

    /// Transport failure talking to the check endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// The check endpoint answered with a server error.
    #[error("license server error: HTTP {status}")]
    Server { status: u16 },

    /// Response body was not the expected JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client could not be built or the request could not be formed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl LicenseError {
    /// Returns true if retrying the same request may succeed.
    ///
    /// Covers a backend that is still waking up: dropped connections,
    /// gateway errors, and half-written bodies.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LicenseError::Network(_) | LicenseError::Server { .. } | LicenseError::Serialization(_)
        )
    }
}

impl From<reqwest::Error> for LicenseError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            LicenseError::Client(e.to_string())
        } else {
            LicenseError::Network(e.to_string())
        }
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
