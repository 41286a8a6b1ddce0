//! Caller-visible routing errors.

use crate::capability::domain::Capability;
use crate::handler::{domain::HandlerId, ports::HandlerError, services::RegistryError};
use crate::tenant::{domain::TenantId, ports::ProfileRepositoryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

/// Category of a failed call, independent of the concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Tenant unknown to the profile store.
    AuthenticationFailed,
    /// Capability not enabled for the tenant.
    UnsupportedCapability,
    /// Tenant quota for the capability is exhausted.
    QuotaExceeded,
    /// Capability enabled but no handler is registered for it.
    NotFound,
    /// Request rejected by the handler's own preconditions.
    InvalidInput,
    /// Handler failed or timed out during execution.
    HandlerFailure,
    /// A pipeline stage rejected the request before core invocation.
    PipelineAborted,
    /// Registry or profile storage failed.
    Internal,
}

impl ErrorKind {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::UnsupportedCapability => "unsupported_capability",
            Self::QuotaExceeded => "quota_exceeded",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::HandlerFailure => "handler_failure",
            Self::PipelineAborted => "pipeline_aborted",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a failed router call. Nothing is retried.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No business profile exists for the tenant.
    #[error("authentication failed: unknown tenant {tenant_id} requesting {capability}")]
    AuthenticationFailed {
        /// Calling tenant.
        tenant_id: TenantId,
        /// Requested capability.
        capability: Capability,
    },

    /// The capability is not in the tenant's enabled set.
    #[error("capability {capability} is not enabled for tenant {tenant_id}")]
    UnsupportedCapability {
        /// Calling tenant.
        tenant_id: TenantId,
        /// Requested capability.
        capability: Capability,
    },

    /// The tenant exhausted its quota.
    #[error("tenant {tenant_id} exceeded its {capability} quota ({consumed}/{limit})")]
    QuotaExceeded {
        /// Calling tenant.
        tenant_id: TenantId,
        /// Requested capability.
        capability: Capability,
        /// Configured ceiling.
        limit: u64,
        /// Executions charged or in flight.
        consumed: u64,
    },

    /// No handler is registered for an enabled capability.
    #[error("no handler registered for {capability} (tenant {tenant_id})")]
    NotFound {
        /// Calling tenant.
        tenant_id: TenantId,
        /// Requested capability.
        capability: Capability,
    },

    /// The selected handler rejected or failed the request.
    ///
    /// The handler's error is preserved unchanged.
    #[error("handler {handler_id} failed {capability} for tenant {tenant_id}: {source}")]
    Handler {
        /// Calling tenant.
        tenant_id: TenantId,
        /// Requested capability.
        capability: Capability,
        /// Handler that was selected.
        handler_id: HandlerId,
        /// Error raised by the handler.
        #[source]
        source: HandlerError,
    },

    /// The handler list lock was poisoned.
    #[error("handler registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// Profile storage failed.
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
}

impl RouterError {
    /// Maps the error onto its caller-visible category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthenticationFailed { .. } => ErrorKind::AuthenticationFailed,
            Self::UnsupportedCapability { .. } => ErrorKind::UnsupportedCapability,
            Self::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Handler {
                source: HandlerError::InvalidInput(_),
                ..
            } => ErrorKind::InvalidInput,
            Self::Handler { .. } => ErrorKind::HandlerFailure,
            Self::RegistryUnavailable(_) | Self::Profiles(_) => ErrorKind::Internal,
        }
    }

    /// Returns the tenant the failed call was made for, when known.
    #[must_use]
    pub const fn tenant_id(&self) -> Option<&TenantId> {
        match self {
            Self::AuthenticationFailed { tenant_id, .. }
            | Self::UnsupportedCapability { tenant_id, .. }
            | Self::QuotaExceeded { tenant_id, .. }
            | Self::NotFound { tenant_id, .. }
            | Self::Handler { tenant_id, .. } => Some(tenant_id),
            Self::RegistryUnavailable(_) | Self::Profiles(_) => None,
        }
    }

    /// Returns the requested capability, when known.
    #[must_use]
    pub const fn capability(&self) -> Option<Capability> {
        match self {
            Self::AuthenticationFailed { capability, .. }
            | Self::UnsupportedCapability { capability, .. }
            | Self::QuotaExceeded { capability, .. }
            | Self::NotFound { capability, .. }
            | Self::Handler { capability, .. } => Some(*capability),
            Self::RegistryUnavailable(_) | Self::Profiles(_) => None,
        }
    }
}

impl From<RegistryError> for RouterError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound {
                capability,
                tenant_id,
            } => Self::NotFound {
                tenant_id,
                capability,
            },
            RegistryError::Poisoned(reason) => Self::RegistryUnavailable(reason),
            RegistryError::Profiles(source) => Self::Profiles(source),
        }
    }
}
