//! License-gated converter page logic.
//!
//! # Architecture
//!
//! - **State**: [`AppState`] is the only mutable record; it is owned by a
//!   [`Gate`] and passed by reference to [`render`]
//! - **Render**: a pure function from state to [`View`], called after every
//!   mutation
//! - **Gate**: the controller. Handles key edits, file selection and
//!   conversion, and runs at most one validation session at a time
//!
//! # Example
//!
//! ```no_run
//! use artypacks_api::{ApiConfig, HttpConvertClient};
//! use artypacks_gate::{Gate, GateConfig};
//! use artypacks_license::HttpCheckClient;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let checker = Arc::new(HttpCheckClient::new("https://api.example.com/check")?);
//! let converter = Arc::new(HttpConvertClient::new(
//!     "https://api.example.com/convert",
//!     &ApiConfig::default(),
//! )?);
//! let mut gate = Gate::new(checker, converter, GateConfig::default());
//!
//! gate.on_key_input("ABCDE12345");
//! let view = gate.settle().await;
//! println!("{view}");
//! # Ok(())
//! # }
//! ```

mod error;
mod gate;
pub mod render;
mod session;
pub mod state;

pub use error::{GateError, GateResult};
pub use gate::{Gate, GateConfig};
pub use render::{render, View};
pub use session::GateEvent;
pub use state::{AddFilesReport, AppState, ConversionState, FileEntry, LicensePhase};
