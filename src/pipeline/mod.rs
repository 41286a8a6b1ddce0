//! Request pipeline: cross-cutting stages around capability execution.
//!
//! A [`services::RequestPipeline`] brackets one router call with the hooks
//! of every registered [`ports::PipelineStage`], in ascending priority order:
//! authenticate, transform request, invoke the router, transform response,
//! audit. Audit runs exactly once per stage for every run, including runs
//! aborted during authentication. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Built-in stages in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
