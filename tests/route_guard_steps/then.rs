//! Then steps for route guard BDD scenarios.

use super::world::RouteGuardWorld;
use flowboard::access::domain::{RoleSet, RouteDecision};
use rstest_bdd_macros::then;

fn session_roles(world: &RouteGuardWorld) -> Result<&RoleSet, eyre::Report> {
    world
        .session
        .as_ref()
        .map(|session| session.roles())
        .ok_or_else(|| eyre::eyre!("missing session in scenario world"))
}

#[then(r#"they are redirected to "{path}""#)]
fn redirected_to(world: &RouteGuardWorld, path: String) -> Result<(), eyre::Report> {
    match world.decision.as_ref() {
        Some(RouteDecision::Redirect(target)) if target.as_str() == path => Ok(()),
        other => Err(eyre::eyre!("expected redirect to {path}, got {other:?}")),
    }
}

#[then("access is allowed")]
fn access_allowed(world: &RouteGuardWorld) -> Result<(), eyre::Report> {
    match world.decision.as_ref() {
        Some(RouteDecision::Allow) => Ok(()),
        other => Err(eyre::eyre!("expected access, got {other:?}")),
    }
}

#[then(r#"the first menu entry is "{label}""#)]
fn first_menu_entry(world: &RouteGuardWorld, label: String) -> Result<(), eyre::Report> {
    let roles = session_roles(world)?;
    let first = world
        .access
        .navigation_for(roles)
        .first()
        .map(|item| item.label);
    eyre::ensure!(
        first == Some(label.as_str()),
        "expected first menu entry {label}, got {first:?}"
    );
    Ok(())
}

#[then(r#"the home route is "{path}""#)]
fn home_route_is(world: &RouteGuardWorld, path: String) -> Result<(), eyre::Report> {
    let home = world.access.resolve_home_route(session_roles(world)?);
    eyre::ensure!(home.as_str() == path, "expected home {path}, got {home}");
    Ok(())
}
