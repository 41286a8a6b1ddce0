//! Audit records emitted once per pipeline run.

use crate::capability::domain::{Capability, RequestId};
use crate::router::domain::ErrorKind;
use crate::tenant::domain::TenantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final status of an audited run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// The router produced a response.
    Completed,
    /// The router or a later phase failed.
    Failed,
    /// A stage rejected the caller before the router ran.
    Aborted,
}

impl AuditStatus {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What every stage's audit hook observes about a finished run.
///
/// # Examples
///
/// ```rust
/// use switchyard::pipeline::domain::AuditStatus;
///
/// assert_eq!(AuditStatus::Aborted.as_str(), "aborted");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Request being audited.
    pub request_id: RequestId,
    /// Calling tenant.
    pub tenant_id: TenantId,
    /// Requested capability.
    pub capability: Capability,
    /// Outcome of the run.
    pub status: AuditStatus,
    /// Handler that served the request, when one ran successfully.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler_id: Option<String>,
    /// Error category for failed and aborted runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Error message for failed and aborted runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Total run time in milliseconds.
    pub elapsed_ms: u64,
    /// When the run was audited.
    pub recorded_at: DateTime<Utc>,
}
