//! Immutable handler registration record.

use super::{HandlerId, HandlerScope};
use crate::capability::domain::Capability;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Snapshot of a handler taken when it registered.
///
/// Records are never mutated; `sequence` is the zero-based registration
/// order and breaks priority ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerRecord {
    handler_id: HandlerId,
    priority: i32,
    capabilities: BTreeSet<Capability>,
    scope: HandlerScope,
    sequence: u64,
}

impl HandlerRecord {
    /// Creates a registration record.
    #[must_use]
    pub const fn new(
        handler_id: HandlerId,
        priority: i32,
        capabilities: BTreeSet<Capability>,
        scope: HandlerScope,
        sequence: u64,
    ) -> Self {
        Self {
            handler_id,
            priority,
            capabilities,
            scope,
            sequence,
        }
    }

    /// Returns the handler identifier.
    #[must_use]
    pub const fn handler_id(&self) -> &HandlerId {
        &self.handler_id
    }

    /// Returns the priority; lower values are preferred.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the supported capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> &BTreeSet<Capability> {
        &self.capabilities
    }

    /// Returns the handler scope.
    #[must_use]
    pub const fn scope(&self) -> &HandlerScope {
        &self.scope
    }

    /// Returns the registration order.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns whether the handler supports `capability`.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Returns whether this record wins over `other` within one scope
    /// partition: lower priority first, then earlier registration.
    #[must_use]
    pub const fn precedes(&self, other: &Self) -> bool {
        self.priority < other.priority
            || (self.priority == other.priority && self.sequence < other.sequence)
    }
}
