//! Capability request and response values.

use super::{Capability, Metadata, Payload, RequestId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single typed capability invocation.
///
/// # Examples
///
/// ```rust
/// use switchyard::capability::domain::{Capability, CapabilityRequest, Payload};
///
/// let request = CapabilityRequest::new(Capability::Translation, Payload::text("bonjour"))
///     .with_parameter("target_language", "en");
/// assert_eq!(request.capability(), Capability::Translation);
/// assert_eq!(request.parameters().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityRequest {
    id: RequestId,
    capability: Capability,
    input: Payload,
    parameters: Metadata,
}

impl CapabilityRequest {
    /// Creates a request with a fresh identifier and no parameters.
    #[must_use]
    pub fn new(capability: Capability, input: Payload) -> Self {
        Self {
            id: RequestId::new(),
            capability,
            input,
            parameters: Metadata::new(),
        }
    }

    /// Adds a single parameter.
    #[must_use]
    pub fn with_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Replaces the parameter bag.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Metadata) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the requested capability.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.capability
    }

    /// Returns the input payload.
    #[must_use]
    pub const fn input(&self) -> &Payload {
        &self.input
    }

    /// Returns the request parameters.
    #[must_use]
    pub const fn parameters(&self) -> &Metadata {
        &self.parameters
    }

    /// Replaces the input payload ahead of dispatch.
    pub fn replace_input(&mut self, input: Payload) {
        self.input = input;
    }
}

/// Result of a successful capability execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityResponse {
    request_id: RequestId,
    capability: Capability,
    output: Payload,
    metadata: Metadata,
    elapsed: Duration,
}

impl CapabilityResponse {
    /// Creates a response for the given request.
    #[must_use]
    pub const fn new(
        request_id: RequestId,
        capability: Capability,
        output: Payload,
        metadata: Metadata,
        elapsed: Duration,
    ) -> Self {
        Self {
            request_id,
            capability,
            output,
            metadata,
            elapsed,
        }
    }

    /// Returns the identifier of the originating request.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the executed capability.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.capability
    }

    /// Returns the output payload.
    #[must_use]
    pub const fn output(&self) -> &Payload {
        &self.output
    }

    /// Returns the response metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns the handler execution time.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Replaces the output payload during response post-processing.
    pub fn replace_output(&mut self, output: Payload) {
        self.output = output;
    }

    /// Inserts or overwrites a metadata entry.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.metadata.insert(key.into(), value.into());
    }
}
