//! Domain model for pipeline runs.

mod audit;
mod context;
mod error;
mod state;

pub use audit::{AuditRecord, AuditStatus};
pub use context::PipelineContext;
pub use error::{PipelineError, PipelineResult, PipelineStateError};
pub use state::{PipelineRun, PipelineState};
