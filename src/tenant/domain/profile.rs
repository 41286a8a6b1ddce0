//! Business profile aggregate.

use super::{QuotaLimit, TenantDomainError, TenantId};
use crate::capability::domain::{Capability, Metadata};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-tenant configuration: entitlements, quotas and free-form parameters.
///
/// Profiles are replaced as whole values; there is no field-level patching.
/// Capabilities absent from the quota map are unlimited.
///
/// # Examples
///
/// ```rust
/// use switchyard::capability::domain::Capability;
/// use switchyard::tenant::domain::{BusinessProfile, QuotaLimit, TenantId};
///
/// let profile = BusinessProfile::new(TenantId::new("edu_001")?, "Edu Platform")?
///     .with_capability(Capability::MathProblemGeneration)
///     .with_quota(Capability::MathProblemGeneration, QuotaLimit::Limited(100));
///
/// assert!(profile.is_enabled(Capability::MathProblemGeneration));
/// assert!(!profile.is_enabled(Capability::Translation));
/// assert_eq!(profile.quota_for(Capability::Translation), QuotaLimit::Unlimited);
/// # Ok::<(), switchyard::tenant::domain::TenantDomainError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileDocument")]
pub struct BusinessProfile {
    tenant_id: TenantId,
    display_name: String,
    enabled_capabilities: BTreeSet<Capability>,
    quota: BTreeMap<Capability, QuotaLimit>,
    parameters: Metadata,
}

/// Unvalidated wire shape of a profile.
#[derive(Deserialize)]
struct ProfileDocument {
    tenant_id: TenantId,
    display_name: String,
    #[serde(default)]
    enabled_capabilities: BTreeSet<Capability>,
    #[serde(default)]
    quota: BTreeMap<Capability, QuotaLimit>,
    #[serde(default)]
    parameters: Metadata,
}

impl TryFrom<ProfileDocument> for BusinessProfile {
    type Error = TenantDomainError;

    fn try_from(document: ProfileDocument) -> Result<Self, Self::Error> {
        Ok(Self::new(document.tenant_id, document.display_name)?
            .with_capabilities(document.enabled_capabilities)
            .with_quotas(document.quota)
            .with_parameters(document.parameters))
    }
}

impl BusinessProfile {
    /// Creates a profile with no enabled capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`TenantDomainError::EmptyDisplayName`] when the display name
    /// is blank after trimming.
    pub fn new(
        tenant_id: TenantId,
        raw_display_name: impl Into<String>,
    ) -> Result<Self, TenantDomainError> {
        let display_name = raw_display_name.into().trim().to_owned();
        if display_name.is_empty() {
            return Err(TenantDomainError::EmptyDisplayName);
        }

        Ok(Self {
            tenant_id,
            display_name,
            enabled_capabilities: BTreeSet::new(),
            quota: BTreeMap::new(),
            parameters: Metadata::new(),
        })
    }

    /// Enables a capability.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.enabled_capabilities.insert(capability);
        self
    }

    /// Enables every capability in `capabilities`.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.enabled_capabilities.extend(capabilities);
        self
    }

    /// Sets the quota for one capability.
    #[must_use]
    pub fn with_quota(mut self, capability: Capability, limit: QuotaLimit) -> Self {
        self.quota.insert(capability, limit);
        self
    }

    /// Sets several quotas at once.
    #[must_use]
    pub fn with_quotas(
        mut self,
        quotas: impl IntoIterator<Item = (Capability, QuotaLimit)>,
    ) -> Self {
        self.quota.extend(quotas);
        self
    }

    /// Adds a custom parameter.
    #[must_use]
    pub fn with_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Replaces the custom parameter bag.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Metadata) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the tenant identifier.
    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the human-readable tenant name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the enabled capability set.
    #[must_use]
    pub const fn enabled_capabilities(&self) -> &BTreeSet<Capability> {
        &self.enabled_capabilities
    }

    /// Returns the configured quotas.
    #[must_use]
    pub const fn quotas(&self) -> &BTreeMap<Capability, QuotaLimit> {
        &self.quota
    }

    /// Returns the custom parameters.
    #[must_use]
    pub const fn parameters(&self) -> &Metadata {
        &self.parameters
    }

    /// Returns whether the tenant may invoke `capability`.
    #[must_use]
    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.enabled_capabilities.contains(&capability)
    }

    /// Returns the quota for `capability`, defaulting to unlimited.
    #[must_use]
    pub fn quota_for(&self, capability: Capability) -> QuotaLimit {
        self.quota.get(&capability).copied().unwrap_or_default()
    }
}
