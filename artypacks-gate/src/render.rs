//! UI state synchronizer.
//!
//! [`render`] derives every visible affordance from an [`AppState`] and
//! holds no state of its own, so rendering the same state twice gives the
//! same [`View`].

use crate::state::{AppState, ConversionState};
use artypacks_license::StatusLine;
use artypacks_types::FileId;
use serde::Serialize;
use std::fmt;

/// Tooltip on the locked drop zone.
pub const LOCKED_TOOLTIP: &str = "Please enter a valid license key to upload files.";

/// Notice while the license is not valid.
pub const LOCKED_NOTICE: &str = "Converter locked – enter license key above.";

/// Notice when the license is valid and nothing is queued.
pub const READY_EMPTY_NOTICE: &str = "Ready to convert. Please add one or more .brushset files.";

/// The drop zone's accept state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropZoneView {
    pub accepting: bool,
    pub tooltip: Option<&'static str>,
}

/// One row of the file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRow {
    /// Key of the row's remove affordance.
    pub id: FileId,
    pub name: String,
    pub size: u64,
}

/// Result area under the convert button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ResultView {
    Hidden,
    Progress { text: String },
    Download { url: String },
    Error { text: String },
}

/// Everything the page shows, derived from state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub convert_enabled: bool,
    pub drop_zone: DropZoneView,
    pub files: Vec<FileRow>,
    pub file_list_hidden: bool,
    pub notice: String,
    pub license_status: Option<StatusLine>,
    pub result: ResultView,
}

/// Renders `state` into a [`View`].
#[must_use]
pub fn render(state: &AppState) -> View {
    let valid = state.is_license_valid();
    let uploading = state.is_uploading();

    let files: Vec<FileRow> = state
        .files()
        .iter()
        .map(|entry| FileRow {
            id: entry.id,
            name: entry.file.name().to_string(),
            size: entry.file.size(),
        })
        .collect();

    View {
        convert_enabled: valid && !files.is_empty() && !uploading,
        drop_zone: DropZoneView {
            accepting: valid,
            tooltip: if valid { None } else { Some(LOCKED_TOOLTIP) },
        },
        file_list_hidden: files.is_empty(),
        notice: notice(valid, files.len(), state.max_files()),
        license_status: state.license_status().cloned(),
        result: result(state.conversion()),
        files,
    }
}

fn notice(valid: bool, count: usize, max_files: usize) -> String {
    match (valid, count) {
        (false, _) => LOCKED_NOTICE.to_string(),
        (true, 0) => READY_EMPTY_NOTICE.to_string(),
        (true, n) if n >= max_files => {
            format!("Ready to convert {n} file(s). That's the maximum per conversion.")
        }
        (true, n) => format!("Ready to convert {n} file(s)."),
    }
}

fn result(conversion: &ConversionState) -> ResultView {
    match conversion {
        ConversionState::Idle => ResultView::Hidden,
        ConversionState::Uploading { files } => ResultView::Progress {
            text: format!("Converting {files} file(s)..."),
        },
        ConversionState::Done { download_url } => ResultView::Download {
            url: download_url.clone(),
        },
        ConversionState::Failed { message } => ResultView::Error {
            text: message.clone(),
        },
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = &self.license_status {
            writeln!(f, "License: {}", status.text)?;
        }
        writeln!(f, "{}", self.notice)?;
        for (i, row) in self.files.iter().enumerate() {
            writeln!(f, "  {}. {} ({} bytes)", i + 1, row.name, row.size)?;
        }
        match &self.result {
            ResultView::Hidden => {}
            ResultView::Progress { text } | ResultView::Error { text } => writeln!(f, "{text}")?,
            ResultView::Download { url } => writeln!(f, "Download: {url}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artypacks_license::ValidationOutcome;
    use artypacks_types::SelectedFile;

    fn valid_state() -> AppState {
        let mut state = AppState::default();
        state.apply_outcome(&ValidationOutcome::Valid { credits: Some(3) });
        state
    }

    fn brushset(name: &str) -> SelectedFile {
        SelectedFile::new(name, vec![1u8; 16])
    }

    #[test]
    fn locked_view() {
        let view = render(&AppState::default());
        assert!(!view.convert_enabled);
        assert!(!view.drop_zone.accepting);
        assert_eq!(view.drop_zone.tooltip, Some(LOCKED_TOOLTIP));
        assert_eq!(view.notice, LOCKED_NOTICE);
        assert!(view.file_list_hidden);
        assert_eq!(view.result, ResultView::Hidden);
    }

    #[test]
    fn valid_without_files_cannot_convert() {
        let view = render(&valid_state());
        assert!(!view.convert_enabled);
        assert!(view.drop_zone.accepting);
        assert_eq!(view.drop_zone.tooltip, None);
        assert_eq!(view.notice, READY_EMPTY_NOTICE);
    }

    #[test]
    fn valid_with_files_can_convert() {
        let mut state = valid_state();
        state.add_files([brushset("Inking.brushset")]);
        let view = render(&state);
        assert!(view.convert_enabled);
        assert!(!view.file_list_hidden);
        assert_eq!(view.files[0].name, "Inking.brushset");
        assert_eq!(view.files[0].size, 16);
        assert_eq!(view.notice, "Ready to convert 1 file(s).");
    }

    #[test]
    fn full_queue_notice() {
        let mut state = valid_state();
        state.add_files([
            brushset("a.brushset"),
            brushset("b.brushset"),
            brushset("c.brushset"),
        ]);
        let view = render(&state);
        assert!(view.notice.contains("maximum"));
    }

    #[test]
    fn rows_keyed_by_entry_id_in_order() {
        let mut state = valid_state();
        let report = state.add_files([brushset("a.brushset"), brushset("b.brushset")]);
        let view = render(&state);
        let ids: Vec<FileId> = view.files.iter().map(|r| r.id).collect();
        assert_eq!(ids, report.accepted);
    }

    #[test]
    fn files_kept_but_locked_when_license_lost() {
        let mut state = valid_state();
        state.add_files([brushset("a.brushset")]);
        state.begin_check();
        let view = render(&state);
        assert!(!view.convert_enabled);
        assert_eq!(view.files.len(), 1);
        assert_eq!(view.notice, LOCKED_NOTICE);
    }

    #[test]
    fn uploading_disables_convert() {
        let mut state = valid_state();
        state.add_files([brushset("a.brushset")]);
        state.begin_conversion();
        let view = render(&state);
        assert!(!view.convert_enabled);
        assert_eq!(
            view.result,
            ResultView::Progress {
                text: "Converting 1 file(s)...".into()
            }
        );
    }

    #[test]
    fn render_is_idempotent() {
        let mut state = valid_state();
        state.add_files([brushset("a.brushset"), brushset("b.brushset")]);
        assert_eq!(render(&state), render(&state));
    }

    #[test]
    fn display_lists_files_and_status() {
        let mut state = valid_state();
        state.add_files([brushset("a.brushset")]);
        let text = render(&state).to_string();
        assert!(text.contains("License: You have 3 conversions left."));
        assert!(text.contains("1. a.brushset (16 bytes)"));
    }
}
