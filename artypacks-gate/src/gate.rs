//! The page controller.
//!
//! `Gate` owns the [`AppState`] and the single live validation session.
//! Session work runs in spawned tasks that report back over a channel; the
//! gate applies a report only if the session that produced it is still the
//! live one and its token has not been cancelled. A stale answer that races
//! past cancellation is dropped at that check.

use crate::error::{GateError, GateResult};
use crate::render::{render, View};
use crate::session::{GateEvent, ValidationSession};
use crate::state::{AddFilesReport, AppState, UploadGuard, DEFAULT_MAX_FILES};
use artypacks_api::{ApiError, Conversion, ConvertClient};
use artypacks_license::{
    CheckClient, LicenseKey, ProgressFn, ValidationOutcome, Validator, ValidatorConfig,
};
use artypacks_types::{FileId, SelectedFile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Configuration for a [`Gate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Maximum number of queued files.
    pub max_files: usize,
    /// Quiet period after a key edit before the check fires (ms).
    pub debounce_ms: u64,
    /// Retry policy for validation.
    pub validator: ValidatorConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            debounce_ms: 500,
            validator: ValidatorConfig::default(),
        }
    }
}

impl GateConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// License-gated converter controller.
///
/// Methods that start validation spawn onto the current Tokio runtime.
pub struct Gate {
    config: GateConfig,
    state: AppState,
    key: Option<LicenseKey>,
    validator: Arc<Validator>,
    converter: Arc<dyn ConvertClient>,
    session: Option<ValidationSession>,
    last_generation: u64,
    events_tx: mpsc::UnboundedSender<GateEvent>,
    events_rx: mpsc::UnboundedReceiver<GateEvent>,
}

impl Gate {
    pub fn new(
        checker: Arc<dyn CheckClient>,
        converter: Arc<dyn ConvertClient>,
        config: GateConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let validator = Arc::new(Validator::new(checker, config.validator.clone()));
        Self {
            state: AppState::new(config.max_files),
            config,
            key: None,
            validator,
            converter,
            session: None,
            last_generation: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Renders the current state.
    pub fn view(&self) -> View {
        render(&self.state)
    }

    /// Returns the generation of the live session, if one is running.
    pub fn live_generation(&self) -> Option<u64> {
        self.session.as_ref().map(ValidationSession::generation)
    }

    /// True while a validation session is live.
    pub fn is_checking(&self) -> bool {
        self.session.is_some()
    }

    // ── License key ──────────────────────────────────────────────

    /// Handles an edit of the license key field.
    ///
    /// Any live session is cancelled first. Keys that are too short are
    /// not checked at all; others are checked after the debounce window.
    pub fn on_key_input(&mut self, raw: &str) -> View {
        self.cancel_validation();
        self.state.reset_license();

        match LicenseKey::parse(raw) {
            Ok(key) => {
                self.key = Some(key.clone());
                self.start_validation(key, false);
            }
            Err(_) => {
                self.key = None;
            }
        }
        self.view()
    }

    /// Cancels the live session, if any. State is left as it is.
    pub fn cancel_validation(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("Cancelling validation session {}", session.generation());
        }
    }

    fn start_validation(&mut self, key: LicenseKey, post_conversion: bool) {
        self.cancel_validation();

        self.last_generation += 1;
        let generation = self.last_generation;
        let token = CancellationToken::new();
        let delay = if post_conversion {
            Duration::ZERO
        } else {
            self.config.debounce()
        };

        self.state.begin_check();
        self.session = Some(ValidationSession::new(generation, token.clone()));
        debug!("Starting validation session {} for {}", generation, key.masked());

        let validator = Arc::clone(&self.validator);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }

            let progress_events = events.clone();
            let progress: ProgressFn = Arc::new(move |message: &'static str| {
                let _ = progress_events.send(GateEvent::Progress { generation, message });
            });

            let outcome = validator
                .validate(&key, post_conversion, &token, Some(progress))
                .await;
            if outcome != ValidationOutcome::Cancelled {
                let _ = events.send(GateEvent::Validated { generation, outcome });
            }
        });
    }

    // ── Session events ───────────────────────────────────────────

    /// Applies an event from a session task.
    ///
    /// Returns false if the event was dropped because its session is no
    /// longer live.
    pub fn apply(&mut self, event: GateEvent) -> bool {
        let live = self
            .session
            .as_ref()
            .is_some_and(|session| session.accepts(event.generation()));
        if !live {
            debug!("Dropping event from stale session {}", event.generation());
            return false;
        }

        match event {
            GateEvent::Progress { message, .. } => self.state.set_progress(message),
            GateEvent::Validated { outcome, .. } => {
                self.session = None;
                self.state.apply_outcome(&outcome);
            }
        }
        true
    }

    /// Waits for the next event that changes state and returns the new view.
    ///
    /// Returns `None` once no session is live.
    pub async fn next_update(&mut self) -> Option<View> {
        while self.session.is_some() {
            let event = self.events_rx.recv().await?;
            if self.apply(event) {
                return Some(self.view());
            }
        }
        None
    }

    /// Runs the live session, if any, to completion.
    pub async fn settle(&mut self) -> View {
        while self.next_update().await.is_some() {}
        self.view()
    }

    // ── Files ────────────────────────────────────────────────────

    /// Offers files to the drop zone.
    pub fn add_files(
        &mut self,
        files: impl IntoIterator<Item = SelectedFile>,
    ) -> GateResult<AddFilesReport> {
        if !self.state.is_license_valid() {
            return Err(GateError::Locked);
        }
        Ok(self.state.add_files(files))
    }

    /// Removes a queued file by id.
    pub fn remove_file(&mut self, id: FileId) -> bool {
        self.state.remove_file(id)
    }

    // ── Conversion ───────────────────────────────────────────────

    /// Uploads the queued files.
    pub async fn convert(&mut self) -> GateResult<Conversion> {
        self.convert_with(CancellationToken::new()).await
    }

    /// Uploads the queued files; cancelling `token` aborts the upload.
    ///
    /// Success empties the queue. Success and server-side failure both
    /// trigger a quiet re-validation so the credit count is current.
    /// Dropping the returned future leaves the queue intact and the page
    /// ready to convert again.
    pub async fn convert_with(&mut self, token: CancellationToken) -> GateResult<Conversion> {
        let key = match (&self.key, self.state.is_license_valid()) {
            (Some(key), true) => key.clone(),
            _ => return Err(GateError::Locked),
        };
        if self.state.files().is_empty() {
            return Err(GateError::NoFiles);
        }

        let files: Vec<SelectedFile> = self.state.files().iter().map(|e| e.file.clone()).collect();
        info!("Converting {} file(s)", files.len());

        // If this future is dropped mid-upload, the guard resets the state.
        let upload = UploadGuard::begin(&mut self.state);
        let result = self.converter.convert(&key, &files, &token).await;
        upload.disarm();

        match result {
            Ok(conversion) => {
                self.state.finish_conversion(&conversion);
                self.start_validation(key, true);
                Ok(conversion)
            }
            Err(ApiError::Cancelled) => {
                info!("Conversion cancelled");
                self.state.reset_conversion();
                Err(ApiError::Cancelled.into())
            }
            Err(e) => {
                warn!("Conversion failed: {}", e);
                self.state.fail_conversion(e.user_message());
                self.start_validation(key, true);
                Err(e.into())
            }
        }
    }
}
