//! In-memory integration tests for handler selection and error precedence.

use std::sync::Arc;

use super::helpers::{
    TestRouter, handler, limited_profile, profile, register_general, register_profile,
    register_scoped, router, tenant,
};
use rstest::rstest;
use serde_json::json;
use switchyard::{
    capability::domain::{Capability, CapabilityRequest, Payload, metadata_keys},
    router::domain::{ErrorKind, RouterError},
};

fn deep_thinking() -> CapabilityRequest {
    CapabilityRequest::new(Capability::DeepThinking, Payload::text("why is the sky blue?"))
}

fn served_by(response: &switchyard::capability::domain::CapabilityResponse) -> Option<&str> {
    response
        .metadata()
        .get(metadata_keys::HANDLER_ID)
        .and_then(serde_json::Value::as_str)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tenant_scoped_handler_serves_its_tenant_only(router: Arc<TestRouter>) {
    register_profile(&router, profile("business_a", &[Capability::DeepThinking])).await;
    register_profile(&router, profile("business_b", &[Capability::DeepThinking])).await;
    register_general(&router, handler("general", 2, &[Capability::DeepThinking]));
    register_scoped(
        &router,
        handler("biz_b_only", 9, &[Capability::DeepThinking]),
        "business_b",
    );

    let for_a = router
        .execute(deep_thinking(), &tenant("business_a"))
        .await
        .expect("business_a should be served");
    let for_b = router
        .execute(deep_thinking(), &tenant("business_b"))
        .await
        .expect("business_b should be served");

    assert_eq!(served_by(&for_a), Some("general"));
    assert_eq!(served_by(&for_b), Some("biz_b_only"));
    assert_eq!(
        for_b.metadata().get(metadata_keys::HANDLER_SCOPE),
        Some(&json!("tenant_scoped"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn translation_stays_unsupported_for_edu_tenant(router: Arc<TestRouter>) {
    register_profile(
        &router,
        profile("edu_001", &[Capability::MathProblemGeneration]),
    )
    .await;
    let request = || CapabilityRequest::new(Capability::Translation, Payload::text("bonjour"));

    let before = router
        .execute(request(), &tenant("edu_001"))
        .await
        .expect_err("translation is not enabled");
    register_general(&router, handler("translator", 1, &[Capability::Translation]));
    let after = router
        .execute(request(), &tenant("edu_001"))
        .await
        .expect_err("translation is still not enabled");

    assert_eq!(before.kind(), ErrorKind::UnsupportedCapability);
    assert_eq!(after.kind(), ErrorKind::UnsupportedCapability);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_tenant_outranks_every_other_failure(router: Arc<TestRouter>) {
    register_profile(&router, limited_profile("known", Capability::DeepThinking, 0)).await;

    let error = router
        .execute(deep_thinking(), &tenant("stranger"))
        .await
        .expect_err("unknown tenant should fail");

    assert!(matches!(
        error,
        RouterError::AuthenticationFailed {
            capability: Capability::DeepThinking,
            ..
        }
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_replacement_takes_effect_immediately(router: Arc<TestRouter>) {
    register_general(
        &router,
        handler(
            "polyglot",
            1,
            &[Capability::Translation, Capability::Summarization],
        ),
    );
    register_profile(&router, profile("media", &[Capability::Translation])).await;
    router
        .execute(
            CapabilityRequest::new(Capability::Translation, Payload::text("hola")),
            &tenant("media"),
        )
        .await
        .expect("translation is enabled");

    register_profile(&router, profile("media", &[Capability::Summarization])).await;
    let error = router
        .execute(
            CapabilityRequest::new(Capability::Translation, Payload::text("hola")),
            &tenant("media"),
        )
        .await
        .expect_err("translation was dropped by the new profile");

    assert_eq!(error.kind(), ErrorKind::UnsupportedCapability);
    let available = router
        .registry()
        .available_capabilities(&tenant("media"))
        .await
        .expect("lookup should succeed");
    assert_eq!(available.into_iter().collect::<Vec<_>>(), vec![Capability::Summarization]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failure_details_name_tenant_and_capability(router: Arc<TestRouter>) {
    register_profile(&router, profile("lab", &[Capability::CodeGeneration])).await;
    register_general(
        &router,
        handler("coder", 1, &[Capability::CodeGeneration]).failing_with("compiler crashed"),
    );

    let error = router
        .execute(
            CapabilityRequest::new(Capability::CodeGeneration, Payload::text("fn main")),
            &tenant("lab"),
        )
        .await
        .expect_err("handler failure should surface");

    assert_eq!(error.kind(), ErrorKind::HandlerFailure);
    assert_eq!(error.tenant_id(), Some(&tenant("lab")));
    assert_eq!(error.capability(), Some(Capability::CodeGeneration));
    let message = error.to_string();
    assert!(message.contains("coder"));
    assert!(message.contains("compiler crashed"));
}

#[expect(clippy::float_arithmetic, reason = "coverage is compared within epsilon")]
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_reflect_registrations(router: Arc<TestRouter>) {
    register_profile(&router, profile("t1", &[])).await;
    register_profile(&router, profile("t2", &[])).await;
    register_general(
        &router,
        handler("words", 1, &[Capability::TextGeneration, Capability::Translation]),
    );
    register_scoped(&router, handler("pixels", 1, &[Capability::ImageGeneration]), "t2");

    let stats = router
        .registry()
        .statistics()
        .await
        .expect("statistics should succeed");

    assert_eq!(stats.handler_count, 2);
    assert_eq!(stats.capability_count, Capability::all().len());
    assert_eq!(stats.supported_capability_count, 3);
    assert_eq!(stats.tenant_count, 2);
    assert!((stats.coverage_rate - 0.3).abs() < f64::EPSILON);
}
