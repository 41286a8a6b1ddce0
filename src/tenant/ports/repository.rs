//! Repository port for business profiles.

use crate::tenant::domain::{BusinessProfile, TenantId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Business profile storage contract.
///
/// Profiles are keyed by tenant. Writes replace the whole profile.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Inserts or replaces the profile keyed by its tenant identifier.
    ///
    /// Returns the previous profile when one was replaced.
    async fn upsert(
        &self,
        profile: BusinessProfile,
    ) -> ProfileRepositoryResult<Option<BusinessProfile>>;

    /// Finds the profile for a tenant.
    ///
    /// Returns `None` when the tenant is unknown.
    async fn find(&self, tenant_id: &TenantId) -> ProfileRepositoryResult<Option<BusinessProfile>>;

    /// Returns the number of stored profiles.
    async fn count(&self) -> ProfileRepositoryResult<usize>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// Storage-layer failure.
    #[error("profile persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
