//! Application services for capability execution.

mod router;

pub use router::CapabilityRouter;
