//! Endpoint configuration.
//!
//! The external services are injected as URLs at deploy time. Required
//! endpoints are the license check and the conversion API; history
//! recovery and the contact relay are optional.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the license check endpoint.
pub const CHECK_ENDPOINT_VAR: &str = "CHECK_API_ENDPOINT";
/// Environment variable holding the conversion endpoint.
pub const CONVERT_ENDPOINT_VAR: &str = "CONVERT_API_ENDPOINT";
/// Environment variable holding the history recovery endpoint.
pub const HISTORY_ENDPOINT_VAR: &str = "HISTORY_API_ENDPOINT";
/// Environment variable holding the contact form relay endpoint.
pub const CONTACT_ENDPOINT_VAR: &str = "CONTACT_FORM_ENDPOINT";

/// URLs of the external services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// License check endpoint.
    pub check: String,
    /// Conversion (upload) endpoint.
    pub convert: String,
    /// Conversion history endpoint.
    #[serde(default)]
    pub history: Option<String>,
    /// Contact form relay endpoint.
    #[serde(default)]
    pub contact: Option<String>,
}

impl Endpoints {
    /// Loads endpoints from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads endpoints through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let endpoints = Self {
            check: get(CHECK_ENDPOINT_VAR).ok_or(Error::MissingEndpoint(CHECK_ENDPOINT_VAR))?,
            convert: get(CONVERT_ENDPOINT_VAR)
                .ok_or(Error::MissingEndpoint(CONVERT_ENDPOINT_VAR))?,
            history: get(HISTORY_ENDPOINT_VAR),
            contact: get(CONTACT_ENDPOINT_VAR),
        };
        endpoints.validate()?;
        Ok(endpoints)
    }

    /// Checks that every configured endpoint is an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let all = [
            Some(&self.check),
            Some(&self.convert),
            self.history.as_ref(),
            self.contact.as_ref(),
        ];
        for url in all.into_iter().flatten() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!("endpoint is not an http(s) URL: {url}")));
            }
        }
        Ok(())
    }
}
