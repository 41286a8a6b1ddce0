//! Port contracts for pipeline stages.

pub mod stage;

pub use stage::{PipelineStage, StageRejection};
