//! Error types for tenant domain validation.

use thiserror::Error;

/// Errors returned while constructing tenant domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TenantDomainError {
    /// The tenant identifier is empty after trimming.
    #[error("tenant identifier must not be empty")]
    EmptyTenantId,

    /// The tenant identifier contains whitespace or control characters.
    #[error("tenant identifier '{0}' contains whitespace or control characters")]
    InvalidTenantId(String),

    /// The tenant identifier exceeds the 100-character limit.
    #[error("tenant identifier exceeds 100 character limit: {0}")]
    TenantIdTooLong(String),

    /// The profile display name is empty after trimming.
    #[error("business profile display name must not be empty")]
    EmptyDisplayName,
}
