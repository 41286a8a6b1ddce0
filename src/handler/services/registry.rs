//! Handler registry and the resolution algorithm.
//!
//! Provides [`HandlerRegistry`], which owns the ordered handler list and the
//! business profile store, and maps each (capability, tenant) pair to a single
//! handler.

use crate::capability::domain::Capability;
use crate::handler::{
    domain::{HandlerRecord, RegistryStatistics},
    ports::{CapabilityHandler, RegisteredHandler},
};
use crate::tenant::{
    domain::{BusinessProfile, TenantId},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors returned by the handler registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No registered handler can serve the capability for this tenant.
    #[error("no handler registered for {capability} (tenant {tenant_id})")]
    NotFound {
        /// Requested capability.
        capability: Capability,
        /// Requesting tenant.
        tenant_id: TenantId,
    },

    /// The handler list lock was poisoned by a panicking writer.
    #[error("handler registry lock poisoned: {0}")]
    Poisoned(String),

    /// Profile storage failed.
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Outcome of a handler registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The handler was added with this record.
    Registered(HandlerRecord),
    /// A handler with the same identifier already exists; its record is kept.
    AlreadyRegistered(HandlerRecord),
}

/// The handler chosen for one call.
#[derive(Clone)]
pub struct ResolvedHandler {
    record: Arc<HandlerRecord>,
    handler: Arc<dyn CapabilityHandler>,
}

impl ResolvedHandler {
    /// Returns the registration record of the chosen handler.
    #[must_use]
    pub fn record(&self) -> &HandlerRecord {
        &self.record
    }

    /// Returns the chosen handler.
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn CapabilityHandler> {
        &self.handler
    }
}

struct RegistryEntry {
    record: Arc<HandlerRecord>,
    handler: RegisteredHandler,
}

/// Registry of handlers and business profiles.
///
/// Handlers are append-only and kept in registration order. Reads take a
/// shared lock only for the duration of the lookup; handlers are never
/// executed while the lock is held.
pub struct HandlerRegistry<P>
where
    P: ProfileRepository,
{
    entries: RwLock<Vec<RegistryEntry>>,
    profiles: Arc<P>,
}

impl<P> HandlerRegistry<P>
where
    P: ProfileRepository,
{
    /// Creates an empty registry over the given profile store.
    #[must_use]
    pub const fn new(profiles: Arc<P>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            profiles,
        }
    }

    /// Returns the shared profile store.
    #[must_use]
    pub const fn profiles(&self) -> &Arc<P> {
        &self.profiles
    }

    /// Registers a handler unless one with the same identifier exists.
    ///
    /// The first registration for an identifier is authoritative; later ones
    /// are ignored and reported as [`RegistrationOutcome::AlreadyRegistered`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Poisoned`] when the handler list lock is
    /// poisoned.
    pub fn register_handler(
        &self,
        handler: RegisteredHandler,
    ) -> RegistryResult<RegistrationOutcome> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| RegistryError::Poisoned(err.to_string()))?;

        let candidate = handler.handler();
        if let Some(existing) = entries
            .iter()
            .find(|entry| entry.record.handler_id() == candidate.id())
        {
            tracing::debug!(
                handler_id = %candidate.id(),
                "ignoring duplicate handler registration"
            );
            return Ok(RegistrationOutcome::AlreadyRegistered(
                existing.record.as_ref().clone(),
            ));
        }

        let sequence = u64::try_from(entries.len()).unwrap_or(u64::MAX);
        let record = HandlerRecord::new(
            candidate.id().clone(),
            candidate.priority(),
            candidate.capabilities(),
            handler.scope(),
            sequence,
        );
        tracing::debug!(
            handler_id = %record.handler_id(),
            priority = record.priority(),
            scope = record.scope().as_str(),
            "registered handler"
        );
        entries.push(RegistryEntry {
            record: Arc::new(record.clone()),
            handler,
        });
        Ok(RegistrationOutcome::Registered(record))
    }

    /// Inserts or replaces a business profile.
    ///
    /// Returns the replaced profile, if any. Replacement is whole-object:
    /// nothing from the previous profile is merged.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Profiles`] when the store rejects the write.
    pub async fn register_profile(
        &self,
        profile: BusinessProfile,
    ) -> RegistryResult<Option<BusinessProfile>> {
        let tenant_id = profile.tenant_id().clone();
        let replaced = self.profiles.upsert(profile).await?;
        if replaced.is_some() {
            tracing::info!(tenant_id = %tenant_id, "replaced business profile");
        } else {
            tracing::debug!(tenant_id = %tenant_id, "registered business profile");
        }
        Ok(replaced)
    }

    /// Looks up the profile for a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Profiles`] when the lookup fails.
    pub async fn profile(&self, tenant_id: &TenantId) -> RegistryResult<Option<BusinessProfile>> {
        Ok(self.profiles.find(tenant_id).await?)
    }

    /// Selects the handler for `capability` on behalf of `tenant_id`.
    ///
    /// Candidates are the handlers supporting the capability. If any of them
    /// is scoped to this tenant, only tenant-scoped candidates are considered,
    /// whatever their priority; otherwise the general ones. Within that set the
    /// lowest priority wins and ties go to the earliest registration.
    /// Entitlement is not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no candidate exists or
    /// [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn resolve(
        &self,
        capability: Capability,
        tenant_id: &TenantId,
    ) -> RegistryResult<ResolvedHandler> {
        let entries = self
            .entries
            .read()
            .map_err(|err| RegistryError::Poisoned(err.to_string()))?;

        let mut tenant_best: Option<&RegistryEntry> = None;
        let mut general_best: Option<&RegistryEntry> = None;

        for entry in entries
            .iter()
            .filter(|entry| entry.record.supports(capability))
        {
            let slot = match &entry.handler {
                RegisteredHandler::TenantScoped(_, target) if target == tenant_id => {
                    &mut tenant_best
                }
                RegisteredHandler::TenantScoped(..) => continue,
                RegisteredHandler::General(_) => &mut general_best,
            };
            if slot.is_none_or(|best| entry.record.precedes(&best.record)) {
                *slot = Some(entry);
            }
        }

        tenant_best
            .or(general_best)
            .map(|entry| ResolvedHandler {
                record: Arc::clone(&entry.record),
                handler: Arc::clone(entry.handler.handler()),
            })
            .ok_or_else(|| RegistryError::NotFound {
                capability,
                tenant_id: tenant_id.clone(),
            })
    }

    /// Returns the tenant's enabled capabilities that at least one registered
    /// handler supports. Unknown tenants get an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the lock is poisoned or profile lookup
    /// fails.
    pub async fn available_capabilities(
        &self,
        tenant_id: &TenantId,
    ) -> RegistryResult<BTreeSet<Capability>> {
        let Some(profile) = self.profiles.find(tenant_id).await? else {
            return Ok(BTreeSet::new());
        };
        let supported = self.supported_capabilities()?;
        Ok(profile
            .enabled_capabilities()
            .intersection(&supported)
            .copied()
            .collect())
    }

    /// Returns aggregate counts over handlers, the catalogue and tenants.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the lock is poisoned or the profile
    /// count fails.
    pub async fn statistics(&self) -> RegistryResult<RegistryStatistics> {
        let (handler_count, supported) = {
            let entries = self
                .entries
                .read()
                .map_err(|err| RegistryError::Poisoned(err.to_string()))?;
            (entries.len(), union_of(&entries))
        };
        let tenant_count = self.profiles.count().await?;
        Ok(RegistryStatistics::new(
            handler_count,
            Capability::ALL.len(),
            supported.len(),
            tenant_count,
        ))
    }

    /// Returns every registration record in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn records(&self) -> RegistryResult<Vec<HandlerRecord>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| RegistryError::Poisoned(err.to_string()))?;
        Ok(entries
            .iter()
            .map(|entry| entry.record.as_ref().clone())
            .collect())
    }

    fn supported_capabilities(&self) -> RegistryResult<BTreeSet<Capability>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| RegistryError::Poisoned(err.to_string()))?;
        Ok(union_of(&entries))
    }
}

fn union_of(entries: &[RegistryEntry]) -> BTreeSet<Capability> {
    entries
        .iter()
        .flat_map(|entry| entry.record.capabilities().iter().copied())
        .collect()
}
