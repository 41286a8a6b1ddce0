//! Then steps for capability routing BDD scenarios.

use super::world::{RoutingWorld, parse_capability, parse_tenant};
use rstest_bdd_macros::then;
use switchyard::capability::domain::metadata_keys;

#[then(r#"the request is served by "{handler}""#)]
fn served_by(world: &RoutingWorld, handler: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no request was executed"))?;
    let response = result
        .as_ref()
        .map_err(|err| eyre::eyre!("expected success, got {err}"))?;
    let served = response
        .metadata()
        .get(metadata_keys::HANDLER_ID)
        .and_then(serde_json::Value::as_str);
    if served != Some(handler.as_str()) {
        return Err(eyre::eyre!("expected handler '{handler}', got {served:?}"));
    }
    Ok(())
}

#[then(r#"the request fails with "{kind}""#)]
fn fails_with(world: &RoutingWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no request was executed"))?;
    match result {
        Err(err) if err.kind().as_str() == kind => Ok(()),
        Err(err) => Err(eyre::eyre!("expected {kind}, got {} ({err})", err.kind())),
        Ok(_) => Err(eyre::eyre!("expected {kind}, but the request succeeded")),
    }
}

#[then(r#"tenant "{tenant}" has used "{capability}" {count:u64} times"#)]
fn usage_is(
    world: &RoutingWorld,
    tenant: String,
    capability: String,
    count: u64,
) -> Result<(), eyre::Report> {
    let used = world
        .router
        .policy()
        .usage(&parse_tenant(&tenant)?, parse_capability(&capability)?);
    if used != count {
        return Err(eyre::eyre!("expected {count} charged calls, found {used}"));
    }
    Ok(())
}
