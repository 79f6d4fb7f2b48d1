//! Human-readable license status text.

use serde::{Deserialize, Serialize};

/// Shown while a check is in flight and no rotating message has arrived yet.
pub const CHECKING_MESSAGE: &str = "Checking license key...";

/// Shown when the server rejects a key without giving a reason.
pub const INVALID_KEY_MESSAGE: &str = "Invalid license key.";

/// Shown once the retry budget is exhausted.
pub const UNREACHABLE_MESSAGE: &str =
    "Unable to connect to the license server. Please try again later.";

/// Rotating progress messages shown while a cold backend wakes up.
///
/// Cycled in order, wrapping back to the first entry.
pub const WAKING_MESSAGES: &[&str] = &[
    "Checking your license key...",
    "Waking up the conversion server, this can take a moment...",
    "Still waking up. Thanks for your patience...",
    "Almost there, the server is starting its engines...",
    "Hang tight, first checks of the day take a little longer...",
];

/// Returns the waking message for a given tick, wrapping around the list.
#[must_use]
pub fn waking_message(tick: usize) -> &'static str {
    WAKING_MESSAGES[tick % WAKING_MESSAGES.len()]
}

/// Formats the remaining-credit line for a valid key.
#[must_use]
pub fn credits_message(credits: u32) -> String {
    let noun = if credits == 1 { "conversion" } else { "conversions" };
    format!("You have {credits} {noun} left.")
}

/// Visual class of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Checking,
    Valid,
    Invalid,
}

/// A rendered license status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn checking(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Checking,
            text: text.into(),
        }
    }

    pub fn valid(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Valid,
            text: text.into(),
        }
    }

    pub fn invalid(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Invalid,
            text: text.into(),
        }
    }
}
