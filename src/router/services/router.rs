//! Capability router façade.

use crate::capability::domain::{CapabilityRequest, CapabilityResponse, Metadata, metadata_keys};
use crate::handler::{
    ports::{HandlerError, HandlerOutput},
    services::{HandlerRegistry, ResolvedHandler},
};
use crate::router::domain::{RouterConfig, RouterError, RouterResult};
use crate::tenant::{
    domain::TenantId,
    ports::{ProfileRepository, QuotaLedger},
    services::{TenantPolicyError, TenantPolicyService},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Routes capability requests to handlers on behalf of tenants.
///
/// The router holds no per-request state. Quota is reserved atomically
/// before resolution and charged only when the handler succeeds; failures,
/// timeouts and cancelled calls release the reservation.
pub struct CapabilityRouter<P, L>
where
    P: ProfileRepository,
    L: QuotaLedger,
{
    registry: Arc<HandlerRegistry<P>>,
    policy: TenantPolicyService<P, L>,
    config: RouterConfig,
}

impl<P, L> CapabilityRouter<P, L>
where
    P: ProfileRepository,
    L: QuotaLedger,
{
    /// Creates a router over a registry and a usage ledger.
    #[must_use]
    pub fn new(registry: Arc<HandlerRegistry<P>>, ledger: Arc<L>, config: RouterConfig) -> Self {
        let policy = TenantPolicyService::new(Arc::clone(registry.profiles()), ledger);
        Self {
            registry,
            policy,
            config,
        }
    }

    /// Returns the handler registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<HandlerRegistry<P>> {
        &self.registry
    }

    /// Returns the tenant policy service sharing this router's ledger.
    #[must_use]
    pub const fn policy(&self) -> &TenantPolicyService<P, L> {
        &self.policy
    }

    /// Returns the router configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Executes a request with the configured default timeout.
    ///
    /// # Errors
    ///
    /// See [`CapabilityRouter::execute_with_timeout`].
    pub async fn execute(
        &self,
        request: CapabilityRequest,
        tenant_id: &TenantId,
    ) -> RouterResult<CapabilityResponse> {
        self.execute_with_timeout(request, tenant_id, self.config.handler_timeout())
            .await
    }

    /// Executes a request, bounding handler execution by `timeout`.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// unknown tenant, capability not enabled, quota exhausted, no handler,
    /// handler validation, handler execution.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::AuthenticationFailed`],
    /// [`RouterError::UnsupportedCapability`], [`RouterError::QuotaExceeded`],
    /// [`RouterError::NotFound`] or [`RouterError::Handler`] in that order of
    /// precedence, and infrastructure errors from the registry.
    #[tracing::instrument(
        skip_all,
        fields(
            request_id = %request.id(),
            tenant_id = %tenant_id,
            capability = %request.capability()
        )
    )]
    pub async fn execute_with_timeout(
        &self,
        request: CapabilityRequest,
        tenant_id: &TenantId,
        timeout: Option<Duration>,
    ) -> RouterResult<CapabilityResponse> {
        let capability = request.capability();

        let profile = self.registry.profile(tenant_id).await?.ok_or_else(|| {
            RouterError::AuthenticationFailed {
                tenant_id: tenant_id.clone(),
                capability,
            }
        })?;

        if !profile.is_enabled(capability) {
            return Err(RouterError::UnsupportedCapability {
                tenant_id: tenant_id.clone(),
                capability,
            });
        }

        let reservation = self
            .policy
            .reserve(&profile, capability)
            .map_err(|err| match err {
                TenantPolicyError::QuotaExceeded {
                    tenant_id: exhausted,
                    capability: requested,
                    limit,
                    consumed,
                } => RouterError::QuotaExceeded {
                    tenant_id: exhausted,
                    capability: requested,
                    limit,
                    consumed,
                },
                TenantPolicyError::UnknownTenant(unknown) => RouterError::AuthenticationFailed {
                    tenant_id: unknown,
                    capability,
                },
                TenantPolicyError::Repository(source) => RouterError::Profiles(source),
            })?;

        let resolved = self.registry.resolve(capability, tenant_id)?;
        let handler_failure = |source: HandlerError| RouterError::Handler {
            tenant_id: tenant_id.clone(),
            capability,
            handler_id: resolved.record().handler_id().clone(),
            source,
        };

        resolved
            .handler()
            .validate(&request)
            .map_err(handler_failure)?;

        let started = Instant::now();
        let outcome = run_handler(&resolved, &request, timeout).await;
        let elapsed = started.elapsed();

        let output = match outcome {
            Ok(output) => output,
            Err(source) => {
                tracing::warn!(
                    handler_id = %resolved.record().handler_id(),
                    error = %source,
                    "handler execution failed"
                );
                return Err(handler_failure(source));
            }
        };
        reservation.commit();

        let metadata = router_metadata(output.metadata, &resolved, tenant_id, elapsed);
        tracing::debug!(
            handler_id = %resolved.record().handler_id(),
            elapsed_ms = whole_millis(elapsed),
            "capability executed"
        );
        Ok(CapabilityResponse::new(
            request.id(),
            capability,
            output.output,
            metadata,
            elapsed,
        ))
    }
}

async fn run_handler(
    resolved: &ResolvedHandler,
    request: &CapabilityRequest,
    timeout: Option<Duration>,
) -> Result<HandlerOutput, HandlerError> {
    let execution = resolved.handler().execute(request);
    match timeout {
        Some(limit) => tokio::time::timeout(limit, execution)
            .await
            .unwrap_or(Err(HandlerError::TimedOut(limit))),
        None => execution.await,
    }
}

fn router_metadata(
    mut metadata: Metadata,
    resolved: &ResolvedHandler,
    tenant_id: &TenantId,
    elapsed: Duration,
) -> Metadata {
    let record = resolved.record();
    metadata.insert(
        metadata_keys::HANDLER_ID.to_owned(),
        record.handler_id().as_str().into(),
    );
    metadata.insert(
        metadata_keys::HANDLER_SCOPE.to_owned(),
        record.scope().as_str().into(),
    );
    metadata.insert(metadata_keys::TENANT_ID.to_owned(), tenant_id.as_str().into());
    metadata.insert(
        metadata_keys::ELAPSED_MS.to_owned(),
        whole_millis(elapsed).into(),
    );
    metadata
}

fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
