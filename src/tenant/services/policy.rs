//! Entitlement checks and quota accounting for business tenants.
//!
//! Provides [`TenantPolicyService`], which answers whether a tenant may call
//! a capability and charges usage, and [`QuotaReservation`], the guard that
//! makes admission and charging a single atomic unit.

use crate::capability::domain::Capability;
use crate::tenant::{
    domain::{BusinessProfile, QuotaDecision, TenantId, UsageKey},
    ports::{ProfileRepository, ProfileRepositoryError, QuotaLedger},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for tenant policy operations.
#[derive(Debug, Error)]
pub enum TenantPolicyError {
    /// No profile is registered for the tenant.
    #[error("unknown tenant: {0}")]
    UnknownTenant(TenantId),

    /// The tenant has exhausted its quota for the capability.
    #[error("tenant {tenant_id} exhausted its {capability} quota ({consumed}/{limit})")]
    QuotaExceeded {
        /// Tenant identifier.
        tenant_id: TenantId,
        /// Capability whose quota is exhausted.
        capability: Capability,
        /// Configured ceiling.
        limit: u64,
        /// Executions charged or in flight.
        consumed: u64,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
}

/// Result type for tenant policy operations.
pub type TenantPolicyResult<T> = Result<T, TenantPolicyError>;

/// Entitlement and quota service.
pub struct TenantPolicyService<P, L>
where
    P: ProfileRepository,
    L: QuotaLedger,
{
    profiles: Arc<P>,
    ledger: Arc<L>,
}

impl<P, L> Clone for TenantPolicyService<P, L>
where
    P: ProfileRepository,
    L: QuotaLedger,
{
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
            ledger: Arc::clone(&self.ledger),
        }
    }
}

impl<P, L> TenantPolicyService<P, L>
where
    P: ProfileRepository,
    L: QuotaLedger,
{
    /// Creates a policy service over shared profile storage and ledger.
    #[must_use]
    pub const fn new(profiles: Arc<P>, ledger: Arc<L>) -> Self {
        Self { profiles, ledger }
    }

    /// Returns whether `capability` is enabled for the tenant.
    ///
    /// Unknown tenants have nothing enabled.
    ///
    /// # Errors
    ///
    /// Returns [`TenantPolicyError::Repository`] when profile lookup fails.
    pub async fn is_enabled(
        &self,
        tenant_id: &TenantId,
        capability: Capability,
    ) -> TenantPolicyResult<bool> {
        let profile = self.profiles.find(tenant_id).await?;
        Ok(profile.is_some_and(|found| found.is_enabled(capability)))
    }

    /// Compares the tenant's usage (charged plus in flight) with its limit.
    ///
    /// # Errors
    ///
    /// Returns [`TenantPolicyError::UnknownTenant`] when no profile exists or
    /// [`TenantPolicyError::Repository`] when lookup fails.
    pub async fn check_quota(
        &self,
        tenant_id: &TenantId,
        capability: Capability,
    ) -> TenantPolicyResult<QuotaDecision> {
        let profile = self
            .profiles
            .find(tenant_id)
            .await?
            .ok_or_else(|| TenantPolicyError::UnknownTenant(tenant_id.clone()))?;
        let limit = profile.quota_for(capability);
        let key = UsageKey::new(tenant_id.clone(), capability);
        let consumed = self
            .ledger
            .used(&key)
            .saturating_add(self.ledger.reserved(&key));
        Ok(match limit.ceiling() {
            Some(max) if !limit.admits(consumed) => QuotaDecision::Exceeded {
                limit: max,
                consumed,
            },
            _ => QuotaDecision::Allowed,
        })
    }

    /// Charges one successful execution to the tenant.
    pub fn record_usage(&self, tenant_id: &TenantId, capability: Capability) {
        self.ledger
            .record(&UsageKey::new(tenant_id.clone(), capability));
    }

    /// Returns the number of charged executions.
    #[must_use]
    pub fn usage(&self, tenant_id: &TenantId, capability: Capability) -> u64 {
        self.ledger
            .used(&UsageKey::new(tenant_id.clone(), capability))
    }

    /// Atomically checks the quota and reserves one execution.
    ///
    /// The returned guard must be committed once the execution succeeds;
    /// dropping it uncommitted returns the slot.
    ///
    /// # Errors
    ///
    /// Returns [`TenantPolicyError::QuotaExceeded`] when the limit is reached.
    pub fn reserve(
        &self,
        profile: &BusinessProfile,
        capability: Capability,
    ) -> TenantPolicyResult<QuotaReservation<L>> {
        let key = UsageKey::new(profile.tenant_id().clone(), capability);
        match self.ledger.try_reserve(&key, profile.quota_for(capability)) {
            QuotaDecision::Allowed => Ok(QuotaReservation {
                ledger: Arc::clone(&self.ledger),
                key,
                settled: false,
            }),
            QuotaDecision::Exceeded { limit, consumed } => Err(TenantPolicyError::QuotaExceeded {
                tenant_id: profile.tenant_id().clone(),
                capability,
                limit,
                consumed,
            }),
        }
    }
}

/// One admitted, not yet charged execution.
///
/// Released on drop unless [`QuotaReservation::commit`] was called, so failed,
/// timed-out and cancelled executions never consume quota.
#[must_use = "a reservation is released as soon as it is dropped"]
pub struct QuotaReservation<L>
where
    L: QuotaLedger,
{
    ledger: Arc<L>,
    key: UsageKey,
    settled: bool,
}

impl<L> QuotaReservation<L>
where
    L: QuotaLedger,
{
    /// Charges the reserved execution.
    pub fn commit(mut self) {
        self.ledger.commit(&self.key);
        self.settled = true;
    }

    /// Returns the counter key this reservation belongs to.
    #[must_use]
    pub const fn key(&self) -> &UsageKey {
        &self.key
    }
}

impl<L> Drop for QuotaReservation<L>
where
    L: QuotaLedger,
{
    fn drop(&mut self) {
        if !self.settled {
            self.ledger.release(&self.key);
        }
    }
}
