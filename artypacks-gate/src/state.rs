//! Application state.
//!
//! One `AppState` per page controller. Everything visible is derived from
//! it by [`render`](crate::render); nothing else holds UI state.

use artypacks_api::Conversion;
use artypacks_license::status::CHECKING_MESSAGE;
use artypacks_license::{StatusLine, ValidationOutcome};
use artypacks_types::{FileId, SelectedFile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default cap on queued files.
pub const DEFAULT_MAX_FILES: usize = 3;

/// A file accepted into the upload queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub id: FileId,
    pub file: SelectedFile,
}

impl FileEntry {
    fn new(file: SelectedFile) -> Self {
        Self {
            id: FileId::new(),
            file,
        }
    }
}

/// Where license validation currently stands.
///
/// `Idle -> Checking -> {Valid, Invalid, Unreachable}`. Any key edit goes
/// back through `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicensePhase {
    #[default]
    Idle,
    Checking,
    Valid,
    Invalid,
    Unreachable,
}

/// Progress of the most recent conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversionState {
    #[default]
    Idle,
    Uploading { files: usize },
    Done { download_url: String },
    Failed { message: String },
}

/// What happened to a batch of incoming files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddFilesReport {
    /// Ids of the files that were queued, in input order.
    pub accepted: Vec<FileId>,
    /// Names of files without the `.brushset` extension.
    pub rejected: Vec<String>,
    /// Names of brushsets that did not fit under the cap.
    pub dropped: Vec<String>,
}

impl AddFilesReport {
    /// True when files came in but none had the right extension.
    #[must_use]
    pub fn only_wrong_type(&self) -> bool {
        self.accepted.is_empty() && self.dropped.is_empty() && !self.rejected.is_empty()
    }
}

/// The full state of one converter page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    is_license_valid: bool,
    phase: LicensePhase,
    license_status: Option<StatusLine>,
    files_to_upload: Vec<FileEntry>,
    max_files: usize,
    conversion: ConversionState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILES)
    }
}

impl AppState {
    /// Creates an empty, locked state holding at most `max_files` files.
    #[must_use]
    pub fn new(max_files: usize) -> Self {
        Self {
            is_license_valid: false,
            phase: LicensePhase::Idle,
            license_status: None,
            files_to_upload: Vec::new(),
            max_files,
            conversion: ConversionState::Idle,
        }
    }

    pub fn is_license_valid(&self) -> bool {
        self.is_license_valid
    }

    pub fn phase(&self) -> LicensePhase {
        self.phase
    }

    pub fn license_status(&self) -> Option<&StatusLine> {
        self.license_status.as_ref()
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files_to_upload
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn conversion(&self) -> &ConversionState {
        &self.conversion
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.conversion, ConversionState::Uploading { .. })
    }

    /// Queues the `.brushset` files among `incoming`, in order, until the
    /// cap is reached. Everything else is reported, not queued.
    pub fn add_files(
        &mut self,
        incoming: impl IntoIterator<Item = SelectedFile>,
    ) -> AddFilesReport {
        let mut report = AddFilesReport::default();
        for file in incoming {
            if !file.is_brushset() {
                report.rejected.push(file.name().to_string());
            } else if self.files_to_upload.len() >= self.max_files {
                report.dropped.push(file.name().to_string());
            } else {
                let entry = FileEntry::new(file);
                report.accepted.push(entry.id);
                self.files_to_upload.push(entry);
            }
        }
        if !report.dropped.is_empty() {
            debug!(
                "Dropped {} file(s) over the cap of {}",
                report.dropped.len(),
                self.max_files
            );
        }
        report
    }

    /// Removes the file with `id`. Returns false if no such file is queued.
    pub fn remove_file(&mut self, id: FileId) -> bool {
        let before = self.files_to_upload.len();
        self.files_to_upload.retain(|entry| entry.id != id);
        self.files_to_upload.len() != before
    }

    /// Drops the license back to `Idle` with no status text.
    pub(crate) fn reset_license(&mut self) {
        self.is_license_valid = false;
        self.phase = LicensePhase::Idle;
        self.license_status = None;
    }

    /// Enters `Checking`. Validity is withheld until a round-trip completes.
    pub(crate) fn begin_check(&mut self) {
        self.is_license_valid = false;
        self.phase = LicensePhase::Checking;
        self.license_status = Some(StatusLine::checking(CHECKING_MESSAGE));
    }

    pub(crate) fn set_progress(&mut self, message: &str) {
        if self.phase == LicensePhase::Checking {
            self.license_status = Some(StatusLine::checking(message));
        }
    }

    /// Applies a definitive validation outcome. `Cancelled` is ignored.
    pub(crate) fn apply_outcome(&mut self, outcome: &ValidationOutcome) {
        let phase = match outcome {
            ValidationOutcome::Valid { .. } => LicensePhase::Valid,
            ValidationOutcome::Invalid { .. } => LicensePhase::Invalid,
            ValidationOutcome::Unreachable { .. } => LicensePhase::Unreachable,
            ValidationOutcome::Cancelled => return,
        };
        self.phase = phase;
        self.is_license_valid = outcome.is_valid();
        self.license_status = outcome.status_line();
    }

    pub(crate) fn begin_conversion(&mut self) {
        self.conversion = ConversionState::Uploading {
            files: self.files_to_upload.len(),
        };
    }

    /// Records a finished conversion and empties the queue.
    pub(crate) fn finish_conversion(&mut self, conversion: &Conversion) {
        self.files_to_upload.clear();
        self.conversion = ConversionState::Done {
            download_url: conversion.download_url.clone(),
        };
    }

    pub(crate) fn fail_conversion(&mut self, message: String) {
        self.conversion = ConversionState::Failed { message };
    }

    pub(crate) fn reset_conversion(&mut self) {
        self.conversion = ConversionState::Idle;
    }
}

/// Holds the state in `Uploading` for the length of one upload.
///
/// Dropped while still armed (the upload future was abandoned), it puts the
/// result area back to idle so the page can convert again.
pub(crate) struct UploadGuard<'a> {
    state: &'a mut AppState,
    armed: bool,
}

impl<'a> UploadGuard<'a> {
    pub(crate) fn begin(state: &'a mut AppState) -> Self {
        state.begin_conversion();
        Self { state, armed: true }
    }

    /// The upload finished, one way or another; the caller records how.
    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!("Upload abandoned before completion");
            self.state.reset_conversion();
        }
    }
}
