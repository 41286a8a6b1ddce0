//! When steps for capability routing BDD scenarios.

use super::world::{RoutingWorld, parse_capability, parse_tenant, run_async};
use rstest_bdd_macros::when;
use switchyard::capability::domain::{CapabilityRequest, Payload};

#[when(r#"tenant "{tenant}" requests "{capability}""#)]
fn tenant_requests(
    world: &mut RoutingWorld,
    tenant: String,
    capability: String,
) -> Result<(), eyre::Report> {
    let request = CapabilityRequest::new(parse_capability(&capability)?, Payload::text("input"));
    let tenant_id = parse_tenant(&tenant)?;
    world.last_result = Some(run_async(world.router.execute(request, &tenant_id)));
    Ok(())
}
