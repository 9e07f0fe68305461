//! Given steps for route guard BDD scenarios.

use super::world::RouteGuardWorld;
use chrono::Utc;
use eyre::WrapErr;
use flowboard::access::domain::{BearerToken, Role, RoleSet, Session, UserId, UserProfile};
use rstest_bdd_macros::given;

#[given(r#"a signed-in user with roles "{roles}""#)]
fn signed_in_user(world: &mut RouteGuardWorld, roles: String) -> Result<(), eyre::Report> {
    let parsed = roles
        .split(',')
        .map(Role::try_from)
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("parse scenario roles")?;
    let role_set = RoleSet::new(parsed).wrap_err("build scenario role set")?;
    let profile = UserProfile::new(UserId::new(42), "quinn@flow.example", role_set)
        .wrap_err("build scenario profile")?;
    let token = BearerToken::new("scenario-token").wrap_err("build scenario token")?;
    world.session = Some(Session::new(profile, token, Utc::now()));
    Ok(())
}

#[given("no signed-in user")]
fn no_signed_in_user(world: &mut RouteGuardWorld) {
    world.session = None;
}
