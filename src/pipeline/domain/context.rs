//! Mutable per-run context shared by pipeline stages.

use crate::capability::domain::{Capability, CapabilityRequest, Metadata};
use crate::tenant::domain::TenantId;
use serde_json::Value;

/// State visible to every stage during one pipeline run.
///
/// Request-transform stages see the request as left by the stages before
/// them. Credentials are supplied by the caller and never forwarded to the
/// router; annotations are notes stages leave for later stages and audit.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineContext {
    request: CapabilityRequest,
    tenant_id: TenantId,
    credentials: Metadata,
    annotations: Metadata,
}

impl PipelineContext {
    /// Creates a context for a tenant's request.
    #[must_use]
    pub fn new(request: CapabilityRequest, tenant_id: TenantId) -> Self {
        Self {
            request,
            tenant_id,
            credentials: Metadata::new(),
            annotations: Metadata::new(),
        }
    }

    /// Attaches a caller credential, such as an `authorization` token.
    #[must_use]
    pub fn with_credential(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.credentials
            .insert(key.into(), Value::String(value.into()));
        self
    }

    /// Returns a credential as text.
    #[must_use]
    pub fn credential(&self, key: &str) -> Option<&str> {
        self.credentials.get(key).and_then(Value::as_str)
    }

    /// Returns the request as currently transformed.
    #[must_use]
    pub const fn request(&self) -> &CapabilityRequest {
        &self.request
    }

    /// Returns the request for in-place transformation.
    pub const fn request_mut(&mut self) -> &mut CapabilityRequest {
        &mut self.request
    }

    /// Returns the requested capability.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.request.capability()
    }

    /// Returns the calling tenant.
    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the annotations left by stages.
    #[must_use]
    pub const fn annotations(&self) -> &Metadata {
        &self.annotations
    }

    /// Records an annotation, replacing any earlier value under `key`.
    pub fn annotate(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.annotations.insert(key.into(), value.into());
    }
}
