//! Error types for handler domain validation.

use thiserror::Error;

/// Errors returned while constructing handler domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandlerDomainError {
    /// The handler identifier is empty after trimming.
    #[error("handler identifier must not be empty")]
    EmptyHandlerId,

    /// The handler identifier contains characters outside `[a-z0-9_-]`.
    #[error(
        "handler identifier '{0}' contains invalid characters (only lowercase alphanumeric, underscores and hyphens allowed)"
    )]
    InvalidHandlerId(String),

    /// The handler identifier exceeds the 100-character limit.
    #[error("handler identifier exceeds 100 character limit: {0}")]
    HandlerIdTooLong(String),
}
