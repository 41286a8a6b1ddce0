//! Handler scope.

use crate::tenant::domain::TenantId;
use serde::{Deserialize, Serialize};

/// Which tenants a handler serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tenant_id", rename_all = "snake_case")]
pub enum HandlerScope {
    /// Serves every tenant.
    General,
    /// Serves exactly one tenant and shadows general handlers for it.
    TenantScoped(TenantId),
}

impl HandlerScope {
    /// Returns the scope label used in response metadata.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::TenantScoped(_) => "tenant_scoped",
        }
    }

    /// Returns the target tenant of a tenant-scoped handler.
    #[must_use]
    pub const fn target_tenant(&self) -> Option<&TenantId> {
        match self {
            Self::General => None,
            Self::TenantScoped(tenant_id) => Some(tenant_id),
        }
    }
}
