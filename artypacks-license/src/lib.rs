//! License gating for the Artypacks converter.
//!
//! This crate handles:
//! - Local license key input rules (minimum length, masking in logs)
//! - The HTTP check client for the remote license endpoint
//! - Retry-with-backoff validation against a cold-starting backend
//! - Status text for every validation outcome
//!
//! # Design Principles
//!
//! - **Server is the authority**: the client never decides validity itself
//! - **Cancel, don't compare**: a superseded validation is cancelled through
//!   its token and reports `Cancelled`, never a stale answer
//! - **Bounded waiting**: at most `max_attempts` round-trips per session

mod check;
mod error;
mod key;
pub mod status;
mod validator;

pub use check::{CheckClient, CheckOutcome, HttpCheckClient};
pub use error::{LicenseError, LicenseResult};
pub use key::{LicenseKey, MIN_KEY_LEN};
pub use status::{StatusKind, StatusLine};
pub use validator::{ProgressFn, ValidationOutcome, Validator, ValidatorConfig};

pub use tokio_util::sync::CancellationToken;
