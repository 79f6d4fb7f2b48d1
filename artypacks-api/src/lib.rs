//! HTTP clients for the Artypacks conversion services.
//!
//! - **Convert**: multipart upload of `.brushset` files, returns a download link
//! - **History**: previously converted files for a license key
//! - **Contact**: the support contact form relay
//!
//! License checking lives in `artypacks-license`; this crate only talks to
//! the services that consume a validated key.

mod client;
mod contact;
mod convert;
mod error;
mod history;

pub use client::ApiConfig;
pub use contact::{ContactClient, ContactMessage, CONTACT_FAILED_MESSAGE, CONTACT_SENT_MESSAGE};
pub use convert::{Conversion, ConvertClient, HttpConvertClient, FILES_FIELD, LICENSE_KEY_FIELD};
pub use error::{ApiError, ApiResult};
pub use history::{HistoryClient, HistoryEntry};
