//! In-memory integration tests for quota enforcement.

use std::sync::Arc;
use std::time::Duration;

use super::helpers::{
    TestRouter, handler, limited_profile, register_general, register_profile, router, tenant,
};
use rstest::rstest;
use switchyard::{
    capability::domain::{Capability, CapabilityRequest, Payload},
    router::domain::{ErrorKind, RouterError},
    tenant::domain::QuotaDecision,
};

fn summary_request() -> CapabilityRequest {
    CapabilityRequest::new(Capability::Summarization, Payload::text("a very long report"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn quota_is_exhausted_after_limit_successes(router: Arc<TestRouter>) {
    register_profile(&router, limited_profile("news", Capability::Summarization, 2)).await;
    register_general(&router, handler("summariser", 1, &[Capability::Summarization]));

    for _ in 0..2 {
        router
            .execute(summary_request(), &tenant("news"))
            .await
            .expect("within quota");
    }
    let error = router
        .execute(summary_request(), &tenant("news"))
        .await
        .expect_err("quota should be exhausted");

    assert!(matches!(
        error,
        RouterError::QuotaExceeded {
            limit: 2,
            consumed: 2,
            ..
        }
    ));
    assert_eq!(
        router
            .policy()
            .check_quota(&tenant("news"), Capability::Summarization)
            .await
            .expect("check should succeed"),
        QuotaDecision::Exceeded {
            limit: 2,
            consumed: 2
        }
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_executions_leave_quota_untouched(router: Arc<TestRouter>) {
    register_profile(&router, limited_profile("news", Capability::Summarization, 1)).await;
    register_general(
        &router,
        handler("summariser", 1, &[Capability::Summarization]).failing_with("upstream 503"),
    );

    for _ in 0..3 {
        let error = router
            .execute(summary_request(), &tenant("news"))
            .await
            .expect_err("handler always fails");
        assert_eq!(error.kind(), ErrorKind::HandlerFailure);
    }

    assert_eq!(
        router.policy().usage(&tenant("news"), Capability::Summarization),
        0
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn quotas_are_tracked_per_tenant(router: Arc<TestRouter>) {
    register_profile(&router, limited_profile("one", Capability::Summarization, 1)).await;
    register_profile(&router, limited_profile("two", Capability::Summarization, 1)).await;
    register_general(&router, handler("summariser", 1, &[Capability::Summarization]));

    router
        .execute(summary_request(), &tenant("one"))
        .await
        .expect("first tenant within quota");
    router
        .execute(summary_request(), &tenant("two"))
        .await
        .expect("second tenant has its own counter");

    let error = router
        .execute(summary_request(), &tenant("one"))
        .await
        .expect_err("first tenant is exhausted");
    assert_eq!(error.kind(), ErrorKind::QuotaExceeded);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn usage_survives_profile_replacement(router: Arc<TestRouter>) {
    register_profile(&router, limited_profile("news", Capability::Summarization, 1)).await;
    register_general(&router, handler("summariser", 1, &[Capability::Summarization]));
    router
        .execute(summary_request(), &tenant("news"))
        .await
        .expect("within quota");

    register_profile(&router, limited_profile("news", Capability::Summarization, 2)).await;

    router
        .execute(summary_request(), &tenant("news"))
        .await
        .expect("raised limit admits one more");
    let error = router
        .execute(summary_request(), &tenant("news"))
        .await
        .expect_err("raised limit is now exhausted");
    assert_eq!(error.kind(), ErrorKind::QuotaExceeded);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_cannot_overrun_quota(router: Arc<TestRouter>) {
    register_profile(&router, limited_profile("burst", Capability::Summarization, 10)).await;
    register_general(
        &router,
        handler("summariser", 1, &[Capability::Summarization])
            .with_delay(Duration::from_millis(10)),
    );

    let calls: Vec<_> = (0..40)
        .map(|_| {
            let shared = Arc::clone(&router);
            tokio::spawn(async move { shared.execute(summary_request(), &tenant("burst")).await })
        })
        .collect();

    let mut served = 0_u64;
    for call in calls {
        if call.await.expect("task should not panic").is_ok() {
            served += 1;
        }
    }

    assert_eq!(served, 10);
    assert_eq!(
        router.policy().usage(&tenant("burst"), Capability::Summarization),
        10
    );
}
