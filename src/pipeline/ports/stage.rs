//! Stage port: the four hooks a cross-cutting plugin may contribute.

use crate::capability::domain::CapabilityResponse;
use crate::pipeline::domain::{AuditRecord, PipelineContext};
use async_trait::async_trait;
use thiserror::Error;

/// Reason a stage refused to let a request through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct StageRejection {
    reason: String,
}

impl StageRejection {
    /// Creates a rejection with a caller-visible reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the rejection reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Cross-cutting plugin run around every pipeline call.
///
/// Every hook is a no-op unless overridden. Stages run in ascending
/// [`PipelineStage::priority`] order; equal priorities keep insertion order.
#[async_trait]
pub trait PipelineStage: Send + Sync {
    /// Returns the stage name used in logs and abort errors.
    fn name(&self) -> &str;

    /// Returns the ordering key. Lower runs first.
    fn priority(&self) -> i32;

    /// Accepts or rejects the caller before any other hook runs.
    ///
    /// # Errors
    ///
    /// Returns [`StageRejection`] to abort the run.
    async fn authenticate(&self, _context: &PipelineContext) -> Result<(), StageRejection> {
        Ok(())
    }

    /// Rewrites the request before the router sees it.
    async fn process_request(&self, _context: &mut PipelineContext) {}

    /// Rewrites the response before the caller sees it.
    async fn process_response(&self, _context: &PipelineContext, _response: &mut CapabilityResponse) {
    }

    /// Observes the finished run. Called exactly once per run.
    async fn audit(&self, _context: &PipelineContext, _record: &AuditRecord) {}
}
