//! Staged execution around the capability router.

use crate::capability::domain::{CapabilityResponse, metadata_keys};
use crate::pipeline::{
    domain::{
        AuditRecord, AuditStatus, PipelineContext, PipelineError, PipelineResult, PipelineRun,
        PipelineState,
    },
    ports::PipelineStage,
};
use crate::router::services::CapabilityRouter;
use crate::tenant::ports::{ProfileRepository, QuotaLedger};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Runs requests through ordered stages and the capability router.
pub struct RequestPipeline<P, L, C>
where
    P: ProfileRepository,
    L: QuotaLedger,
    C: Clock + Send + Sync,
{
    router: Arc<CapabilityRouter<P, L>>,
    stages: Vec<Arc<dyn PipelineStage>>,
    clock: Arc<C>,
}

impl<P, L, C> RequestPipeline<P, L, C>
where
    P: ProfileRepository,
    L: QuotaLedger,
    C: Clock + Send + Sync,
{
    /// Creates a pipeline with no stages.
    #[must_use]
    pub const fn new(router: Arc<CapabilityRouter<P, L>>, clock: Arc<C>) -> Self {
        Self {
            router,
            stages: Vec::new(),
            clock,
        }
    }

    /// Adds a stage, keeping stages sorted by priority.
    #[must_use]
    pub fn with_stage(mut self, stage: impl PipelineStage + 'static) -> Self {
        self.add_stage(Arc::new(stage));
        self
    }

    /// Adds a shared stage after every stage of lower or equal priority.
    pub fn add_stage(&mut self, stage: Arc<dyn PipelineStage>) {
        let position = self
            .stages
            .partition_point(|existing| existing.priority() <= stage.priority());
        self.stages.insert(position, stage);
    }

    /// Returns stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Returns the router invoked for core execution.
    #[must_use]
    pub const fn router(&self) -> &Arc<CapabilityRouter<P, L>> {
        &self.router
    }

    /// Runs one request through every phase.
    ///
    /// Every stage audits the run exactly once, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Aborted`] when a stage rejects the caller,
    /// and [`PipelineError::Router`] with the router's error unchanged when
    /// core execution fails.
    #[tracing::instrument(
        skip_all,
        fields(
            request_id = %context.request().id(),
            tenant_id = %context.tenant_id(),
            capability = %context.capability()
        )
    )]
    pub async fn run(&self, mut context: PipelineContext) -> PipelineResult<CapabilityResponse> {
        let started = Instant::now();
        let mut run = PipelineRun::new();
        let outcome = self.drive(&mut context, &mut run).await;

        run.advance(PipelineState::Audited)?;
        let record = self.audit_record(&context, &outcome, started.elapsed());
        for stage in &self.stages {
            stage.audit(&context, &record).await;
        }

        let terminal = if outcome.is_ok() {
            PipelineState::Completed
        } else {
            PipelineState::Failed
        };
        run.advance(terminal)?;
        outcome
    }

    async fn drive(
        &self,
        context: &mut PipelineContext,
        run: &mut PipelineRun,
    ) -> PipelineResult<CapabilityResponse> {
        run.advance(PipelineState::Authenticating)?;
        for stage in &self.stages {
            if let Err(rejection) = stage.authenticate(context).await {
                run.advance(PipelineState::Aborted)?;
                tracing::warn!(stage = stage.name(), reason = %rejection, "pipeline aborted");
                return Err(PipelineError::Aborted {
                    stage: stage.name().to_owned(),
                    reason: rejection.reason().to_owned(),
                    tenant_id: context.tenant_id().clone(),
                    capability: context.capability(),
                });
            }
        }

        run.advance(PipelineState::RequestTransform)?;
        for stage in &self.stages {
            stage.process_request(context).await;
        }

        run.advance(PipelineState::CoreInvocation)?;
        let mut response = self
            .router
            .execute(context.request().clone(), context.tenant_id())
            .await?;

        run.advance(PipelineState::ResponseTransform)?;
        for stage in &self.stages {
            stage.process_response(context, &mut response).await;
        }
        Ok(response)
    }

    fn audit_record(
        &self,
        context: &PipelineContext,
        outcome: &PipelineResult<CapabilityResponse>,
        elapsed: Duration,
    ) -> AuditRecord {
        let (status, handler_id, error_kind, error) = match outcome {
            Ok(response) => (
                AuditStatus::Completed,
                response
                    .metadata()
                    .get(metadata_keys::HANDLER_ID)
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned),
                None,
                None,
            ),
            Err(err) => {
                let status = if matches!(err, PipelineError::Aborted { .. }) {
                    AuditStatus::Aborted
                } else {
                    AuditStatus::Failed
                };
                (status, None, Some(err.kind()), Some(err.to_string()))
            }
        };

        AuditRecord {
            request_id: context.request().id(),
            tenant_id: context.tenant_id().clone(),
            capability: context.capability(),
            status,
            handler_id,
            error_kind,
            error,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            recorded_at: self.clock.utc(),
        }
    }
}
