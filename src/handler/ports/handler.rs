//! Handler port: the contract external capability implementations fulfil.

use crate::capability::domain::{Capability, CapabilityRequest, Metadata, Payload};
use crate::handler::domain::{HandlerId, HandlerScope};
use crate::tenant::domain::TenantId;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for handler operations.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// A unit of work implementing one or more capabilities.
///
/// `id`, `priority` and `capabilities` are read once at registration; later
/// changes are not observed by the registry.
#[async_trait]
pub trait CapabilityHandler: Send + Sync {
    /// Returns the unique handler identifier.
    fn id(&self) -> &HandlerId;

    /// Returns the priority; lower values are preferred.
    fn priority(&self) -> i32;

    /// Returns the capabilities this handler implements.
    fn capabilities(&self) -> BTreeSet<Capability>;

    /// Checks handler-specific preconditions before execution.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidInput`] when the request is unusable.
    fn validate(&self, _request: &CapabilityRequest) -> HandlerResult<()> {
        Ok(())
    }

    /// Performs the capability.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] describing the domain failure.
    async fn execute(&self, request: &CapabilityRequest) -> HandlerResult<HandlerOutput>;
}

/// Output produced by a handler, before router metadata is added.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOutput {
    /// Output payload.
    pub output: Payload,
    /// Handler-specific metadata.
    pub metadata: Metadata,
}

impl HandlerOutput {
    /// Creates output with empty metadata.
    #[must_use]
    pub fn new(output: Payload) -> Self {
        Self {
            output,
            metadata: Metadata::new(),
        }
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Errors raised by handlers.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    /// The request failed a handler precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The handler failed while performing the capability.
    #[error("handler execution failed: {0}")]
    Execution(Arc<dyn std::error::Error + Send + Sync>),

    /// The handler did not finish within the allotted time.
    #[error("handler timed out after {0:?}")]
    TimedOut(Duration),
}

impl HandlerError {
    /// Creates an invalid-input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Wraps a domain failure raised during execution.
    pub fn execution(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Execution(Arc::new(err))
    }
}

/// A handler together with its scope, as handed to the registry.
///
/// The scope is part of the variant so that resolution partitions candidates
/// by pattern match.
#[derive(Clone)]
pub enum RegisteredHandler {
    /// Serves every tenant.
    General(Arc<dyn CapabilityHandler>),
    /// Serves a single tenant.
    TenantScoped(Arc<dyn CapabilityHandler>, TenantId),
}

impl RegisteredHandler {
    /// Wraps a general-purpose handler.
    pub fn general(handler: impl CapabilityHandler + 'static) -> Self {
        Self::General(Arc::new(handler))
    }

    /// Wraps a handler dedicated to one tenant.
    pub fn tenant_scoped(handler: impl CapabilityHandler + 'static, tenant_id: TenantId) -> Self {
        Self::TenantScoped(Arc::new(handler), tenant_id)
    }

    /// Returns the wrapped handler.
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn CapabilityHandler> {
        match self {
            Self::General(handler) | Self::TenantScoped(handler, _) => handler,
        }
    }

    /// Returns the scope this handler was registered with.
    #[must_use]
    pub fn scope(&self) -> HandlerScope {
        match self {
            Self::General(_) => HandlerScope::General,
            Self::TenantScoped(_, tenant_id) => HandlerScope::TenantScoped(tenant_id.clone()),
        }
    }
}

impl fmt::Debug for RegisteredHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General(handler) => f.debug_tuple("General").field(handler.id()).finish(),
            Self::TenantScoped(handler, tenant_id) => f
                .debug_tuple("TenantScoped")
                .field(handler.id())
                .field(tenant_id)
                .finish(),
        }
    }
}
