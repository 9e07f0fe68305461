//! Behaviour tests for route guarding and navigation selection.

#[path = "route_guard_steps/mod.rs"]
mod route_guard_steps_defs;

use route_guard_steps_defs::world::{RouteGuardWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/route_guard.feature",
    name = "Project manager is redirected away from user management"
)]
fn manager_redirected_from_users(world: RouteGuardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/route_guard.feature",
    name = "Signed-out visitor is sent to the login page"
)]
fn signed_out_visitor_sent_to_login(world: RouteGuardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/route_guard.feature",
    name = "Super admin reaches the settings page"
)]
fn super_admin_reaches_settings(world: RouteGuardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/route_guard.feature",
    name = "Team member is redirected to their own task list"
)]
fn team_member_redirected_home(world: RouteGuardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/route_guard.feature",
    name = "Client role decides the menu of a mixed account"
)]
fn client_role_decides_menu(world: RouteGuardWorld) {
    let _ = world;
}
