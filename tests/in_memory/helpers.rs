//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use rstest::fixture;
use switchyard::{
    capability::domain::Capability,
    handler::{adapters::ScriptedHandler, ports::RegisteredHandler, services::HandlerRegistry},
    router::{domain::RouterConfig, services::CapabilityRouter},
    tenant::{
        adapters::memory::{InMemoryProfileRepository, InMemoryQuotaLedger},
        domain::{BusinessProfile, QuotaLimit, TenantId},
    },
};

/// Router type wired with in-memory adapters.
pub type TestRouter = CapabilityRouter<InMemoryProfileRepository, InMemoryQuotaLedger>;

/// Provides a router over an empty registry.
#[fixture]
pub fn router() -> Arc<TestRouter> {
    let registry = Arc::new(HandlerRegistry::new(Arc::new(
        InMemoryProfileRepository::new(),
    )));
    Arc::new(CapabilityRouter::new(
        registry,
        Arc::new(InMemoryQuotaLedger::new()),
        RouterConfig::default(),
    ))
}

/// Parses a tenant identifier.
///
/// # Panics
///
/// Panics when `value` is not a valid tenant identifier.
#[must_use]
pub fn tenant(value: &str) -> TenantId {
    TenantId::new(value).expect("valid tenant id")
}

/// Builds a profile enabling `capabilities` with unlimited quota.
///
/// # Panics
///
/// Panics when the tenant identifier is invalid.
#[must_use]
pub fn profile(tenant_id: &str, capabilities: &[Capability]) -> BusinessProfile {
    BusinessProfile::new(tenant(tenant_id), tenant_id)
        .expect("valid profile")
        .with_capabilities(capabilities.iter().copied())
}

/// Builds a profile enabling one capability with a quota.
///
/// # Panics
///
/// Panics when the tenant identifier is invalid.
#[must_use]
pub fn limited_profile(tenant_id: &str, capability: Capability, limit: u64) -> BusinessProfile {
    profile(tenant_id, &[capability]).with_quota(capability, QuotaLimit::Limited(limit))
}

/// Builds an echoing handler.
///
/// # Panics
///
/// Panics when `id` is not a valid handler identifier.
#[must_use]
pub fn handler(id: &str, priority: i32, capabilities: &[Capability]) -> ScriptedHandler {
    ScriptedHandler::new(id, priority, capabilities.iter().copied()).expect("valid handler")
}

/// Registers a general-purpose handler.
///
/// # Panics
///
/// Panics when the registry rejects the handler.
pub fn register_general(router: &TestRouter, handler: ScriptedHandler) {
    router
        .registry()
        .register_handler(RegisteredHandler::general(handler))
        .expect("general registration should succeed");
}

/// Registers a handler scoped to `tenant_id`.
///
/// # Panics
///
/// Panics when the registry rejects the handler.
pub fn register_scoped(router: &TestRouter, handler: ScriptedHandler, tenant_id: &str) {
    router
        .registry()
        .register_handler(RegisteredHandler::tenant_scoped(handler, tenant(tenant_id)))
        .expect("scoped registration should succeed");
}

/// Registers a business profile.
///
/// # Panics
///
/// Panics when the profile store rejects the write.
pub async fn register_profile(router: &TestRouter, profile: BusinessProfile) {
    router
        .registry()
        .register_profile(profile)
        .await
        .expect("profile registration should succeed");
}
