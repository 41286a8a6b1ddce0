//! Deployment configuration: router settings and the profile catalogue.
//!
//! Configuration is plain JSON. Every field is optional:
//!
//! ```json
//! {
//!   "router": { "handler_timeout_ms": 2000 },
//!   "profiles": [
//!     {
//!       "tenant_id": "edu_001",
//!       "display_name": "Edu Platform",
//!       "enabled_capabilities": ["mathProblemGeneration"],
//!       "quota": { "mathProblemGeneration": 100, "deepThinking": null }
//!     }
//!   ]
//! }
//! ```
//!
//! A `null` quota is unlimited, as is any capability missing from the map.

use crate::handler::services::{HandlerRegistry, RegistryError};
use crate::router::domain::RouterConfig;
use crate::tenant::{
    domain::{BusinessProfile, TenantId},
    ports::ProfileRepository,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two profiles name the same tenant.
    #[error("tenant {0} is configured more than once")]
    DuplicateTenant(TenantId),

    /// The registry rejected a profile.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchyardConfig {
    /// Router settings.
    #[serde(default)]
    pub router: RouterConfig,
    /// Business profiles registered at start-up.
    #[serde(default)]
    pub profiles: Vec<BusinessProfile>,
}

impl SwitchyardConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or invalid profile
    /// fields, and [`ConfigError::DuplicateTenant`] when a tenant appears
    /// twice.
    pub fn from_json_str(document: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(document)?;
        let mut seen = BTreeSet::new();
        for profile in &config.profiles {
            if !seen.insert(profile.tenant_id()) {
                return Err(ConfigError::DuplicateTenant(profile.tenant_id().clone()));
            }
        }
        Ok(config)
    }

    /// Registers every configured profile, replacing existing ones.
    ///
    /// Returns the number of profiles registered.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Registry`] when the profile store fails.
    pub async fn apply_profiles<P>(&self, registry: &HandlerRegistry<P>) -> ConfigResult<usize>
    where
        P: ProfileRepository,
    {
        for profile in &self.profiles {
            registry.register_profile(profile.clone()).await?;
        }
        tracing::info!(profiles = self.profiles.len(), "applied business profiles");
        Ok(self.profiles.len())
    }
}
