//! Quota limits and admission decisions.

use super::TenantId;
use crate::capability::domain::Capability;
use serde::{Deserialize, Serialize};

/// Per-capability usage ceiling.
///
/// Serialised as `null` for [`QuotaLimit::Unlimited`] or a non-negative
/// integer for [`QuotaLimit::Limited`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum QuotaLimit {
    /// At most this many successful executions.
    Limited(u64),
    /// No ceiling.
    #[default]
    Unlimited,
}

impl QuotaLimit {
    /// Returns whether one more execution fits after `consumed` ones.
    #[must_use]
    pub const fn admits(self, consumed: u64) -> bool {
        match self {
            Self::Limited(max) => consumed < max,
            Self::Unlimited => true,
        }
    }

    /// Returns the numeric ceiling, if any.
    #[must_use]
    pub const fn ceiling(self) -> Option<u64> {
        match self {
            Self::Limited(max) => Some(max),
            Self::Unlimited => None,
        }
    }
}

impl From<Option<u64>> for QuotaLimit {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Unlimited, Self::Limited)
    }
}

impl From<QuotaLimit> for Option<u64> {
    fn from(value: QuotaLimit) -> Self {
        value.ceiling()
    }
}

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// Another execution is admitted.
    Allowed,
    /// The ceiling has been reached.
    Exceeded {
        /// Configured ceiling.
        limit: u64,
        /// Executions already charged or in flight.
        consumed: u64,
    },
}

impl QuotaDecision {
    /// Returns whether the decision admits the call.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Key of a usage counter: one per (tenant, capability) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsageKey {
    tenant_id: TenantId,
    capability: Capability,
}

impl UsageKey {
    /// Creates a usage key.
    #[must_use]
    pub const fn new(tenant_id: TenantId, capability: Capability) -> Self {
        Self {
            tenant_id,
            capability,
        }
    }

    /// Returns the tenant component.
    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the capability component.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.capability
    }
}
