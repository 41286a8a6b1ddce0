//! Pipeline error types.

use super::PipelineState;
use crate::capability::domain::Capability;
use crate::router::domain::{ErrorKind, RouterError};
use crate::tenant::domain::TenantId;
use thiserror::Error;

/// Result type for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// A pipeline run attempted an illegal phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pipeline cannot move from {from} to {to}")]
pub struct PipelineStateError {
    /// Phase the run was in.
    pub from: PipelineState,
    /// Phase that was requested.
    pub to: PipelineState,
}

/// Failure of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage rejected the caller during authentication.
    #[error("pipeline aborted by stage {stage} for tenant {tenant_id} ({capability}): {reason}")]
    Aborted {
        /// Name of the rejecting stage.
        stage: String,
        /// Rejection reason given by the stage.
        reason: String,
        /// Calling tenant.
        tenant_id: TenantId,
        /// Requested capability.
        capability: Capability,
    },

    /// The router rejected or failed the request.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The run left its lifecycle.
    #[error(transparent)]
    State(#[from] PipelineStateError),
}

impl PipelineError {
    /// Returns the caller-visible category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Aborted { .. } => ErrorKind::PipelineAborted,
            Self::Router(err) => err.kind(),
            Self::State(_) => ErrorKind::Internal,
        }
    }
}
