//! In-memory integration tests for configuration-driven start-up.

use std::sync::Arc;

use super::helpers::{handler, tenant};
use rstest::rstest;
use switchyard::{
    capability::domain::{Capability, CapabilityRequest, Payload},
    config::SwitchyardConfig,
    handler::{ports::RegisteredHandler, services::HandlerRegistry},
    router::{domain::ErrorKind, services::CapabilityRouter},
    tenant::adapters::memory::{InMemoryProfileRepository, InMemoryQuotaLedger},
};

const DOCUMENT: &str = r#"{
    "router": { "handler_timeout_ms": 50 },
    "profiles": [
        {
            "tenant_id": "edu_001",
            "display_name": "Edu Platform",
            "enabled_capabilities": ["mathProblemGeneration"],
            "quota": { "mathProblemGeneration": 1 }
        }
    ]
}"#;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_router_enforces_profiles_and_timeout() {
    let config = SwitchyardConfig::from_json_str(DOCUMENT).expect("document should parse");
    let registry = Arc::new(HandlerRegistry::new(Arc::new(
        InMemoryProfileRepository::new(),
    )));
    config
        .apply_profiles(&registry)
        .await
        .expect("profiles should apply");
    registry
        .register_handler(RegisteredHandler::general(
            handler("slow_math", 1, &[Capability::MathProblemGeneration])
                .with_delay(std::time::Duration::from_secs(5)),
        ))
        .expect("registration should succeed");
    let router = CapabilityRouter::new(
        registry,
        Arc::new(InMemoryQuotaLedger::new()),
        config.router.clone(),
    );

    let error = router
        .execute(
            CapabilityRequest::new(Capability::MathProblemGeneration, Payload::text("2+2")),
            &tenant("edu_001"),
        )
        .await
        .expect_err("slow handler should time out");

    assert_eq!(error.kind(), ErrorKind::HandlerFailure);
    assert_eq!(
        router
            .policy()
            .usage(&tenant("edu_001"), Capability::MathProblemGeneration),
        0
    );
}
