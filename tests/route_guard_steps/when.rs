//! When steps for route guard BDD scenarios.

use super::world::RouteGuardWorld;
use eyre::WrapErr;
use flowboard::access::domain::RoutePath;
use rstest_bdd_macros::when;

#[when(r#"they navigate to "{path}""#)]
fn navigate_to(world: &mut RouteGuardWorld, path: String) -> Result<(), eyre::Report> {
    let route = RoutePath::new(path).wrap_err("parse scenario path")?;
    world.decision = Some(world.access.guard_path(world.session.as_ref(), &route));
    Ok(())
}
