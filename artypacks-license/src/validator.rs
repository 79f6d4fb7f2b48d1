//! Retry-with-backoff license validation.
//!
//! The check backend idles down between uses and can take tens of seconds
//! to answer the first request of the day. The validator keeps retrying
//! transient failures at a fixed delay, up to a hard attempt cap, while a
//! ticker rotates "still waking up" messages for the user.
//!
//! Every wait is raced against the session's [`CancellationToken`]. A
//! cancelled validation returns [`ValidationOutcome::Cancelled`] and the
//! caller must not touch shared state with it.

use crate::check::{CheckClient, CheckOutcome};
use crate::key::LicenseKey;
use crate::status::{
    credits_message, waking_message, StatusLine, INVALID_KEY_MESSAGE, UNREACHABLE_MESSAGE,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

/// Receives rotating progress messages.
pub type ProgressFn = Arc<dyn Fn(&'static str) + Send + Sync>;

/// Retry policy for license validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Hard cap on check attempts per validation.
    pub max_attempts: u32,
    /// Fixed delay between attempts after a transient failure (ms).
    pub retry_delay_ms: u64,
    /// Period of the rotating progress message (ms).
    pub message_interval_ms: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            retry_delay_ms: 2_500,
            message_interval_ms: 3_000,
        }
    }
}

impl ValidatorConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn message_interval(&self) -> Duration {
        Duration::from_millis(self.message_interval_ms.max(1))
    }
}

/// Result of one validation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Server accepted the key.
    Valid { credits: Option<u32> },
    /// Server rejected the key.
    Invalid { message: Option<String> },
    /// No definitive answer within the attempt cap.
    Unreachable { attempts: u32 },
    /// Superseded before a definitive answer was applied.
    Cancelled,
}

impl ValidationOutcome {
    /// Returns true only for `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Returns the status line to show for this outcome, or `None` if the
    /// session was cancelled.
    #[must_use]
    pub fn status_line(&self) -> Option<StatusLine> {
        match self {
            Self::Valid { credits: Some(n) } => Some(StatusLine::valid(credits_message(*n))),
            Self::Valid { credits: None } => Some(StatusLine::valid("License key accepted.")),
            Self::Invalid { message } => Some(StatusLine::invalid(
                message.as_deref().unwrap_or(INVALID_KEY_MESSAGE),
            )),
            Self::Unreachable { .. } => Some(StatusLine::invalid(UNREACHABLE_MESSAGE)),
            Self::Cancelled => None,
        }
    }
}

/// Resolves license validity against a [`CheckClient`].
pub struct Validator {
    client: Arc<dyn CheckClient>,
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(client: Arc<dyn CheckClient>, config: ValidatorConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Runs one validation session.
    ///
    /// With `post_conversion` set the rotating messages are suppressed: the
    /// backend was just used, so there is no cold start to explain.
    pub async fn validate(
        &self,
        key: &LicenseKey,
        post_conversion: bool,
        token: &CancellationToken,
        progress: Option<ProgressFn>,
    ) -> ValidationOutcome {
        let _ticker = match progress {
            Some(progress) if !post_conversion => Some(self.spawn_ticker(token, progress)),
            _ => None,
        };

        let max_attempts = self.config.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            if token.is_cancelled() {
                debug!("Validation of {} cancelled before attempt {}", key.masked(), attempt);
                return ValidationOutcome::Cancelled;
            }

            let result = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Validation of {} cancelled mid-request", key.masked());
                    return ValidationOutcome::Cancelled;
                }
                result = self.client.check(key) => result,
            };

            match result {
                Ok(CheckOutcome::Valid { credits }) => {
                    info!("License key {} valid after {} attempt(s)", key.masked(), attempt);
                    return ValidationOutcome::Valid { credits };
                }
                Ok(CheckOutcome::Invalid { message }) => {
                    info!("License key {} rejected", key.masked());
                    return ValidationOutcome::Invalid { message };
                }
                Err(e) if e.is_transient() => {
                    warn!("License check attempt {}/{} failed: {}", attempt, max_attempts, e);
                    if attempt < max_attempts {
                        tokio::select! {
                            biased;
                            _ = token.cancelled() => return ValidationOutcome::Cancelled,
                            _ = tokio::time::sleep(self.config.retry_delay()) => {}
                        }
                    }
                }
                Err(e) => {
                    warn!("License check cannot be performed: {}", e);
                    return ValidationOutcome::Unreachable { attempts: attempt };
                }
            }
        }

        warn!("License server unreachable after {} attempts", max_attempts);
        ValidationOutcome::Unreachable {
            attempts: max_attempts,
        }
    }

    /// Spawns the rotating-message ticker on a child of `token`. The ticker
    /// stops when the returned guard drops or the parent is cancelled.
    fn spawn_ticker(&self, token: &CancellationToken, progress: ProgressFn) -> DropGuard {
        let ticker_token = token.child_token();
        let period = self.config.message_interval();
        let task_token = ticker_token.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            let mut tick = 0usize;
            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => {
                        progress(waking_message(tick));
                        tick = tick.wrapping_add(1);
                    }
                }
            }
        });

        ticker_token.drop_guard()
    }
}
