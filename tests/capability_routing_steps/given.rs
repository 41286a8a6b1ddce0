//! Given steps for capability routing BDD scenarios.

use super::world::{RoutingWorld, parse_capability, parse_tenant, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use switchyard::{
    handler::{adapters::ScriptedHandler, ports::RegisteredHandler},
    tenant::domain::{BusinessProfile, QuotaLimit},
};

fn register_profile(world: &RoutingWorld, profile: BusinessProfile) -> Result<(), eyre::Report> {
    run_async(world.router.registry().register_profile(profile))
        .wrap_err("register business profile")?;
    Ok(())
}

fn register_handler(world: &RoutingWorld, handler: RegisteredHandler) -> Result<(), eyre::Report> {
    world
        .router
        .registry()
        .register_handler(handler)
        .wrap_err("register handler")?;
    Ok(())
}

#[given(r#"a tenant "{tenant}" with capability "{capability}" enabled"#)]
fn tenant_with_capability(
    world: &mut RoutingWorld,
    tenant: String,
    capability: String,
) -> Result<(), eyre::Report> {
    let profile = BusinessProfile::new(parse_tenant(&tenant)?, tenant.as_str())?
        .with_capability(parse_capability(&capability)?);
    register_profile(world, profile)
}

#[given(r#"a tenant "{tenant}" with capability "{capability}" limited to {limit:u64} call"#)]
fn tenant_with_limited_capability(
    world: &mut RoutingWorld,
    tenant: String,
    capability: String,
    limit: u64,
) -> Result<(), eyre::Report> {
    let parsed = parse_capability(&capability)?;
    let profile = BusinessProfile::new(parse_tenant(&tenant)?, tenant.as_str())?
        .with_capability(parsed)
        .with_quota(parsed, QuotaLimit::Limited(limit));
    register_profile(world, profile)
}

#[given(r#"a general handler "{id}" with priority {priority:i32} for "{capability}""#)]
fn general_handler(
    world: &mut RoutingWorld,
    id: String,
    priority: i32,
    capability: String,
) -> Result<(), eyre::Report> {
    let handler = ScriptedHandler::new(id, priority, [parse_capability(&capability)?])?;
    register_handler(world, RegisteredHandler::general(handler))
}

#[given(r#"a failing general handler "{id}" for "{capability}""#)]
fn failing_handler(
    world: &mut RoutingWorld,
    id: String,
    capability: String,
) -> Result<(), eyre::Report> {
    let handler = ScriptedHandler::new(id, 1, [parse_capability(&capability)?])?
        .failing_with("simulated outage");
    register_handler(world, RegisteredHandler::general(handler))
}

#[given(r#"a handler "{id}" with priority {priority:i32} for "{capability}" scoped to "{tenant}""#)]
fn scoped_handler(
    world: &mut RoutingWorld,
    id: String,
    priority: i32,
    capability: String,
    tenant: String,
) -> Result<(), eyre::Report> {
    let handler = ScriptedHandler::new(id, priority, [parse_capability(&capability)?])?;
    register_handler(
        world,
        RegisteredHandler::tenant_scoped(handler, parse_tenant(&tenant)?),
    )
}
