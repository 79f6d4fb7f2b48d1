//! Contact form submission.

use crate::client::{rejection, ApiConfig};
use crate::error::{ApiError, ApiResult};
use reqwest::multipart::Form;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Shown after a successful submission.
pub const CONTACT_SENT_MESSAGE: &str = "Thank you! Your message has been sent.";

/// Shown when the relay rejects or cannot be reached.
pub const CONTACT_FAILED_MESSAGE: &str = "Oops! There was a problem.";

/// A message from the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Checks that every field is filled in and the email looks like one.
    pub fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err(ApiError::Config("name and message are required".to_string()));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(ApiError::Config(format!("invalid email address: {email}"))),
        }
    }
}

/// Client for the contact form relay.
pub struct ContactClient {
    client: Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>, config: &ApiConfig) -> ApiResult<Self> {
        Ok(Self::with_client(config.build_client()?, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Submits the form as multipart fields, asking the relay for a JSON reply.
    pub async fn submit(&self, message: &ContactMessage) -> ApiResult<()> {
        message.validate()?;

        let form = Form::new()
            .text("name", message.name.trim().to_string())
            .text("email", message.email.trim().to_string())
            .text("message", message.message.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response, CONTACT_FAILED_MESSAGE).await);
        }

        info!("Contact message submitted");
        Ok(())
    }
}
