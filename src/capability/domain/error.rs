//! Error types for capability parsing.

use thiserror::Error;

/// Error returned while parsing a capability identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown capability: {0}")]
pub struct ParseCapabilityError(pub String);
