//! Scripted in-memory handler for tests and local wiring.

use crate::capability::domain::{Capability, CapabilityRequest, Metadata, Payload};
use crate::handler::{
    domain::{HandlerDomainError, HandlerId},
    ports::{CapabilityHandler, HandlerError, HandlerOutput, HandlerResult},
};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What a [`ScriptedHandler`] does when executed.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedBehaviour {
    /// Returns the request input unchanged.
    Echo,
    /// Returns a fixed payload.
    Reply(Payload),
    /// Fails with an execution error carrying the message.
    Fail(String),
}

/// Handler whose behaviour is fixed up front.
///
/// Clones share the invocation counter, so a test can keep one clone and
/// register another.
#[derive(Debug, Clone)]
pub struct ScriptedHandler {
    id: HandlerId,
    priority: i32,
    capabilities: BTreeSet<Capability>,
    behaviour: ScriptedBehaviour,
    delay: Option<Duration>,
    require_text: bool,
    metadata: Metadata,
    invocations: Arc<AtomicUsize>,
}

impl ScriptedHandler {
    /// Creates an echoing handler.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerDomainError`] when `id` is not a valid handler
    /// identifier.
    pub fn new(
        id: impl Into<String>,
        priority: i32,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Result<Self, HandlerDomainError> {
        Ok(Self {
            id: HandlerId::new(id)?,
            priority,
            capabilities: capabilities.into_iter().collect(),
            behaviour: ScriptedBehaviour::Echo,
            delay: None,
            require_text: false,
            metadata: Metadata::new(),
            invocations: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Replies with a fixed payload.
    #[must_use]
    pub fn replying_with(mut self, output: Payload) -> Self {
        self.behaviour = ScriptedBehaviour::Reply(output);
        self
    }

    /// Fails every execution.
    #[must_use]
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.behaviour = ScriptedBehaviour::Fail(message.into());
        self
    }

    /// Sleeps before answering.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Rejects non-text or blank input during validation.
    #[must_use]
    pub const fn requiring_text(mut self) -> Self {
        self.require_text = true;
        self
    }

    /// Adds metadata returned with every successful execution.
    #[must_use]
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns how many times `execute` has been entered.
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CapabilityHandler for ScriptedHandler {
    fn id(&self) -> &HandlerId {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn capabilities(&self) -> BTreeSet<Capability> {
        self.capabilities.clone()
    }

    fn validate(&self, request: &CapabilityRequest) -> HandlerResult<()> {
        if !self.require_text {
            return Ok(());
        }
        match request.input().as_text() {
            Some(text) if !text.trim().is_empty() => Ok(()),
            Some(_) => Err(HandlerError::invalid_input("text input must not be blank")),
            None => Err(HandlerError::invalid_input(format!(
                "expected text input, got {}",
                request.input().kind()
            ))),
        }
    }

    async fn execute(&self, request: &CapabilityRequest) -> HandlerResult<HandlerOutput> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let output = match &self.behaviour {
            ScriptedBehaviour::Echo => request.input().clone(),
            ScriptedBehaviour::Reply(payload) => payload.clone(),
            ScriptedBehaviour::Fail(message) => {
                return Err(HandlerError::execution(std::io::Error::other(
                    message.clone(),
                )));
            }
        };

        Ok(HandlerOutput {
            output,
            metadata: self.metadata.clone(),
        })
    }
}
