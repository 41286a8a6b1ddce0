//! In-memory business profile repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tenant::{
    domain::{BusinessProfile, TenantId},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

/// Thread-safe in-memory profile repository.
///
/// Lives for the process lifetime; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<TenantId, BusinessProfile>>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> ProfileRepositoryError {
    ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert(
        &self,
        profile: BusinessProfile,
    ) -> ProfileRepositoryResult<Option<BusinessProfile>> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        Ok(profiles.insert(profile.tenant_id().clone(), profile))
    }

    async fn find(&self, tenant_id: &TenantId) -> ProfileRepositoryResult<Option<BusinessProfile>> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.get(tenant_id).cloned())
    }

    async fn count(&self) -> ProfileRepositoryResult<usize> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.len())
    }
}
