//! Validated handler identifier.

use super::HandlerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_ID_LENGTH: usize = 100;

/// Unique, human-readable handler identifier (e.g. `general`, `biz_b_only`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HandlerId(String);

impl HandlerId {
    /// Creates a validated handler identifier.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_-]`
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerDomainError::EmptyHandlerId`] when the value is empty
    /// after trimming, [`HandlerDomainError::InvalidHandlerId`] when it
    /// contains other characters, or [`HandlerDomainError::HandlerIdTooLong`]
    /// when it exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, HandlerDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(HandlerDomainError::EmptyHandlerId);
        }

        if normalized.len() > MAX_ID_LENGTH {
            return Err(HandlerDomainError::HandlerIdTooLong(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

        if !is_valid {
            return Err(HandlerDomainError::InvalidHandlerId(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HandlerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HandlerId {
    type Error = HandlerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HandlerId> for String {
    fn from(value: HandlerId) -> Self {
        value.0
    }
}
