//! Validation sessions.

use artypacks_license::ValidationOutcome;
use tokio_util::sync::CancellationToken;

/// The single live validation.
///
/// Dropping a session cancels its token, which stops the in-flight
/// request, the backoff sleep and the progress ticker with it.
#[derive(Debug)]
pub(crate) struct ValidationSession {
    generation: u64,
    token: CancellationToken,
}

impl ValidationSession {
    pub(crate) fn new(generation: u64, token: CancellationToken) -> Self {
        Self { generation, token }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// True if an event tagged with `generation` may still touch state.
    pub(crate) fn accepts(&self, generation: u64) -> bool {
        self.generation == generation && !self.token.is_cancelled()
    }
}

impl Drop for ValidationSession {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Messages from session tasks back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// A rotating "still checking" message.
    Progress {
        generation: u64,
        message: &'static str,
    },
    /// The validator finished.
    Validated {
        generation: u64,
        outcome: ValidationOutcome,
    },
}

impl GateEvent {
    pub fn generation(&self) -> u64 {
        match self {
            GateEvent::Progress { generation, .. } | GateEvent::Validated { generation, .. } => {
                *generation
            }
        }
    }
}
