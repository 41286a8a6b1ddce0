//! In-memory audit trail.

use crate::pipeline::{
    domain::{AuditRecord, PipelineContext},
    ports::PipelineStage,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

/// Keeps every audit record and logs it.
///
/// Clones share the same trail.
#[derive(Debug, Clone, Default)]
pub struct AuditTrailStage {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl AuditTrailStage {
    /// Runs last.
    pub const PRIORITY: i32 = 90;

    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PipelineStage for AuditTrailStage {
    fn name(&self) -> &str {
        "audit_trail"
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    async fn audit(&self, _context: &PipelineContext, record: &AuditRecord) {
        tracing::info!(
            request_id = %record.request_id,
            tenant_id = %record.tenant_id,
            capability = %record.capability,
            status = %record.status,
            handler_id = record.handler_id.as_deref(),
            elapsed_ms = record.elapsed_ms,
            "capability call audited"
        );
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}
