//! Lifecycle of a single pipeline run.

use super::PipelineStateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Context built, no stage has run.
    Created,
    /// Stages are authenticating the caller.
    Authenticating,
    /// A stage rejected the caller.
    Aborted,
    /// Stages are rewriting the request.
    RequestTransform,
    /// The router is executing the request.
    CoreInvocation,
    /// Stages are rewriting the response.
    ResponseTransform,
    /// Every stage has audited the run.
    Audited,
    /// The run produced a response.
    Completed,
    /// The run ended without a response.
    Failed,
}

impl PipelineState {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Authenticating => "authenticating",
            Self::Aborted => "aborted",
            Self::RequestTransform => "request_transform",
            Self::CoreInvocation => "core_invocation",
            Self::ResponseTransform => "response_transform",
            Self::Audited => "audited",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns whether the run has finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns whether a run may move from `self` to `next`.
    ///
    /// `Audited` is reachable from every non-terminal state other than
    /// itself, so a run is audited exactly once whatever phase it stopped in.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Created, Self::Authenticating)
            | (Self::Authenticating, Self::Aborted | Self::RequestTransform)
            | (Self::RequestTransform, Self::CoreInvocation)
            | (Self::CoreInvocation, Self::ResponseTransform)
            | (Self::Audited, Self::Completed | Self::Failed) => true,
            (current, Self::Audited) => !current.is_terminal() && !matches!(current, Self::Audited),
            _ => false,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the phases one run has passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    history: Vec<PipelineState>,
}

impl PipelineRun {
    /// Starts a run in [`PipelineState::Created`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: vec![PipelineState::Created],
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.history
            .last()
            .copied()
            .unwrap_or(PipelineState::Created)
    }

    /// Returns every phase visited, oldest first.
    #[must_use]
    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    /// Moves the run to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineStateError`] when the transition is not allowed.
    pub fn advance(&mut self, next: PipelineState) -> Result<(), PipelineStateError> {
        let current = self.state();
        if !current.can_transition_to(next) {
            return Err(PipelineStateError {
                from: current,
                to: next,
            });
        }
        self.history.push(next);
        Ok(())
    }
}

impl Default for PipelineRun {
    fn default() -> Self {
        Self::new()
    }
}
