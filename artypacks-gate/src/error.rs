//! Error types for the gate.

use artypacks_api::ApiError;
use thiserror::Error;

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;

/// Errors surfaced by [`Gate`](crate::Gate) actions.
#[derive(Debug, Error)]
pub enum GateError {
    /// The license is not (yet) valid.
    #[error("converter locked: enter a valid license key first")]
    Locked,

    /// Convert was requested with an empty queue.
    #[error("no files to convert")]
    NoFiles,

    /// The conversion service failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
