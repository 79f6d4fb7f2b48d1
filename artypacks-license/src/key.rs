//! License key input rules.
//!
//! Keys are opaque to the client; all real validation happens server-side.
//! The only local rule is a minimum length, so half-typed keys never cost
//! a network round-trip.

use crate::error::{LicenseError, LicenseResult};
use std::fmt;

/// Minimum length of a key worth sending to the check endpoint.
pub const MIN_KEY_LEN: usize = 6;

/// A trimmed license key that passed the local length rule.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LicenseKey(String);

impl LicenseKey {
    /// Parses raw input text into a key.
    ///
    /// # Errors
    ///
    /// Returns `KeyTooShort` if the trimmed input has fewer than
    /// [`MIN_KEY_LEN`] characters.
    pub fn parse(raw: &str) -> LicenseResult<Self> {
        let key = raw.trim();
        if key.chars().count() < MIN_KEY_LEN {
            return Err(LicenseError::KeyTooShort { min: MIN_KEY_LEN });
        }
        Ok(Self(key.to_string()))
    }

    /// Returns the key text as sent to the server.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a log-safe rendering that only shows the last four characters.
    #[must_use]
    pub fn masked(&self) -> String {
        let tail: String = {
            let chars: Vec<char> = self.0.chars().collect();
            chars[chars.len().saturating_sub(4)..].iter().collect()
        };
        format!("****{tail}")
    }
}

impl fmt::Debug for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LicenseKey").field(&self.masked()).finish()
    }
}
