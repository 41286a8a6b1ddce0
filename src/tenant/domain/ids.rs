//! Validated tenant identifier.

use super::TenantDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TENANT_ID_LENGTH: usize = 100;

/// Unique key of a business tenant (e.g. `edu_001`, `business_b`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Creates a validated tenant identifier.
    ///
    /// Surrounding whitespace is trimmed; case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`TenantDomainError::EmptyTenantId`] when the value is blank,
    /// [`TenantDomainError::TenantIdTooLong`] past 100 characters, or
    /// [`TenantDomainError::InvalidTenantId`] when it contains inner
    /// whitespace or control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TenantDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(TenantDomainError::EmptyTenantId);
        }
        if trimmed.chars().count() > MAX_TENANT_ID_LENGTH {
            return Err(TenantDomainError::TenantIdTooLong(raw));
        }
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(TenantDomainError::InvalidTenantId(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TenantId {
    type Error = TenantDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}
