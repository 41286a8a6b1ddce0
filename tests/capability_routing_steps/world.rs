//! Shared world state for capability routing BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use switchyard::{
    capability::domain::{Capability, CapabilityResponse},
    handler::services::HandlerRegistry,
    router::{
        domain::{RouterConfig, RouterResult},
        services::CapabilityRouter,
    },
    tenant::{
        adapters::memory::{InMemoryProfileRepository, InMemoryQuotaLedger},
        domain::TenantId,
    },
};

/// Router type used by the BDD world.
pub type TestRouter = CapabilityRouter<InMemoryProfileRepository, InMemoryQuotaLedger>;

/// Scenario world for capability routing behaviour tests.
pub struct RoutingWorld {
    /// The router under test.
    pub router: TestRouter,
    /// Result of the last execution.
    pub last_result: Option<RouterResult<CapabilityResponse>>,
}

impl RoutingWorld {
    /// Creates a world with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        let registry = Arc::new(HandlerRegistry::new(Arc::new(
            InMemoryProfileRepository::new(),
        )));
        Self {
            router: CapabilityRouter::new(
                registry,
                Arc::new(InMemoryQuotaLedger::new()),
                RouterConfig::default(),
            ),
            last_result: None,
        }
    }
}

impl Default for RoutingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RoutingWorld {
    RoutingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a tenant identifier from step text.
///
/// # Errors
///
/// Returns an error when the identifier is invalid.
pub fn parse_tenant(value: &str) -> Result<TenantId, eyre::Report> {
    TenantId::new(value).map_err(|err| eyre::eyre!("invalid tenant '{value}': {err}"))
}

/// Parses a capability from step text.
///
/// # Errors
///
/// Returns an error when the capability is unknown.
pub fn parse_capability(value: &str) -> Result<Capability, eyre::Report> {
    Capability::try_from(value).map_err(|err| eyre::eyre!("{err}"))
}
