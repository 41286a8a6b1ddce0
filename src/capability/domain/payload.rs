//! Request and response payloads plus the schema-less metadata bag.

use serde::{Deserialize, Serialize};

/// Schema-less key/value bag used for request parameters and response
/// metadata.
///
/// Keys are feature-specific; the router's own keys are listed in
/// [`metadata_keys`].
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Metadata keys written by the capability router.
pub mod metadata_keys {
    /// Identifier of the handler that produced the response.
    pub const HANDLER_ID: &str = "handler_id";
    /// `general` or `tenant_scoped`.
    pub const HANDLER_SCOPE: &str = "handler_scope";
    /// Tenant the request was executed for.
    pub const TENANT_ID: &str = "tenant_id";
    /// Handler wall time in whole milliseconds.
    pub const ELAPSED_MS: &str = "elapsed_ms";
    /// Compliance notice attached to non-text responses.
    pub const COMPLIANCE_NOTICE: &str = "compliance_notice";
}

/// Tagged input or output carried by requests and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// UTF-8 text.
    Text(String),
    /// Opaque bytes such as images or audio.
    Binary(Vec<u8>),
    /// Arbitrary structured JSON.
    Structured(serde_json::Value),
}

impl Payload {
    /// Creates a text payload.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the text content when the payload is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) | Self::Structured(_) => None,
        }
    }

    /// Returns the variant name used in logs and error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Binary(_) => "binary",
            Self::Structured(_) => "structured",
        }
    }
}
