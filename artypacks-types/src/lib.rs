//! Core type definitions for the Artypacks brushset converter.
//!
//! This crate defines the small set of types shared by every other crate:
//! - File identifiers (UUID v7)
//! - The user-selected file model and the `.brushset` filter
//! - Endpoint configuration for the external license, conversion,
//!   history and contact services

mod config;
mod file;
mod ids;

pub use config::{
    Endpoints, CHECK_ENDPOINT_VAR, CONTACT_ENDPOINT_VAR, CONVERT_ENDPOINT_VAR, HISTORY_ENDPOINT_VAR,
};
pub use file::{is_brushset, SelectedFile, BRUSHSET_EXTENSION};
pub use ids::FileId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing configuration: {0} is not set")]
    MissingEndpoint(&'static str),

    #[error("invalid configuration: {0}")]
    Config(String),
}
