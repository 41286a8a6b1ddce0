//! In-memory integration tests for the full stage pipeline.

use std::sync::Arc;

use super::helpers::{TestRouter, handler, profile, register_general, register_profile, router, tenant};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use switchyard::{
    capability::domain::{Capability, CapabilityRequest, Payload},
    pipeline::{
        adapters::{
            AUTHORIZATION, AuditTrailStage, ComplianceNoticeStage, PiiRedactionStage,
            TokenAuthStage,
        },
        domain::{AuditStatus, PipelineContext},
        services::RequestPipeline,
    },
    router::domain::ErrorKind,
    tenant::adapters::memory::{InMemoryProfileRepository, InMemoryQuotaLedger},
};

type TestPipeline = RequestPipeline<InMemoryProfileRepository, InMemoryQuotaLedger, DefaultClock>;

/// Router, pipeline and audit trail wired together.
struct Harness {
    router: Arc<TestRouter>,
    pipeline: TestPipeline,
    trail: AuditTrailStage,
}

#[fixture]
fn harness(router: Arc<TestRouter>) -> Harness {
    let trail = AuditTrailStage::new();
    let pipeline = RequestPipeline::new(Arc::clone(&router), Arc::new(DefaultClock))
        .with_stage(trail.clone())
        .with_stage(ComplianceNoticeStage::new("Notice for {{ tenant_id }}."))
        .with_stage(PiiRedactionStage)
        .with_stage(TokenAuthStage::new().with_token(tenant("support"), "t0ken"));
    Harness {
        router,
        pipeline,
        trail,
    }
}

fn support_request(text: &str) -> PipelineContext {
    PipelineContext::new(
        CapabilityRequest::new(Capability::TextGeneration, Payload::text(text)),
        tenant("support"),
    )
}

#[rstest]
fn built_in_stages_run_in_priority_order(harness: Harness) {
    assert_eq!(
        harness.pipeline.stage_names(),
        vec!["token_auth", "pii_redaction", "compliance_notice", "audit_trail"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn authenticated_request_is_redacted_served_and_audited(harness: Harness) {
    register_profile(&harness.router, profile("support", &[Capability::TextGeneration])).await;
    register_general(&harness.router, handler("echo", 1, &[Capability::TextGeneration]));

    let response = harness
        .pipeline
        .run(
            support_request("Reply to jane@example.org")
                .with_credential(AUTHORIZATION, "Bearer t0ken"),
        )
        .await
        .expect("pipeline should succeed");

    assert_eq!(
        response.output(),
        &Payload::text("Reply to [redacted email]\n\nNotice for support.")
    );
    let records = harness.trail.records();
    assert_eq!(records.len(), 1);
    let record = records.first().expect("one audit record");
    assert_eq!(record.status, AuditStatus::Completed);
    assert_eq!(record.handler_id.as_deref(), Some("echo"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_token_aborts_before_the_handler_runs(harness: Harness) {
    register_profile(&harness.router, profile("support", &[Capability::TextGeneration])).await;
    let echo = handler("echo", 1, &[Capability::TextGeneration]);
    register_general(&harness.router, echo.clone());

    let error = harness
        .pipeline
        .run(support_request("hello").with_credential(AUTHORIZATION, "Bearer nope"))
        .await
        .expect_err("wrong token should abort");

    assert_eq!(error.kind(), ErrorKind::PipelineAborted);
    assert_eq!(echo.invocations(), 0);
    let records = harness.trail.records();
    assert_eq!(records.len(), 1);
    let record = records.first().expect("one audit record");
    assert_eq!(record.status, AuditStatus::Aborted);
    assert!(
        record
            .error
            .as_deref()
            .is_some_and(|message| message.contains("token_auth"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn router_errors_pass_through_unchanged(harness: Harness) {
    register_profile(&harness.router, profile("support", &[Capability::TextGeneration])).await;

    let error = harness
        .pipeline
        .run(support_request("hello").with_credential(AUTHORIZATION, "t0ken"))
        .await
        .expect_err("no handler is registered");

    assert_eq!(error.kind(), ErrorKind::NotFound);
    let record = harness
        .trail
        .records()
        .pop()
        .expect("run should be audited");
    assert_eq!(record.status, AuditStatus::Failed);
    assert_eq!(record.error_kind, Some(ErrorKind::NotFound));
}
