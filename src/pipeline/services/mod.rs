//! Application services for pipeline runs.

mod pipeline;

pub use pipeline::RequestPipeline;
