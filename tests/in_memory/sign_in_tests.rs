//! In-memory integration tests for signing in and route guarding.

use super::helpers::{ADA, CLARA, PASSWORD, PRIYA, TESS, context, sign_in, store};
use flowboard::access::{
    adapters::memory::InMemorySessionStore,
    domain::{Credentials, RouteDecision, RoutePath, UserId, navigation_for},
    ports::{AuthError, SessionTeardown},
    services::{AccessControl, SessionError},
};
use rstest::rstest;

#[rstest]
#[case::manager("priya", PRIYA, RoutePath::DASHBOARD)]
#[case::member("tess", TESS, RoutePath::TEAM_MEMBER_TASKS)]
#[case::client("clara", CLARA, RoutePath::CLIENT_OVERVIEW)]
#[case::admin("ada@flow.example", ADA, RoutePath::DASHBOARD)]
#[tokio::test(flavor = "multi_thread")]
async fn sign_in_lands_on_role_home(
    store: InMemorySessionStore,
    #[case] login: &str,
    #[case] expected_user: UserId,
    #[case] expected_home: RoutePath,
) {
    let context = context(&store);

    let signed_in = context
        .sign_in(&Credentials::new(login, PASSWORD))
        .await
        .expect("sign in succeeds");

    assert_eq!(signed_in.session.user_id(), expected_user);
    assert_eq!(signed_in.home, expected_home);
    assert_eq!(
        AccessControl::default().guard_path(Some(&signed_in.session), &signed_in.home),
        RouteDecision::Allow
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_keeps_user_signed_out(store: InMemorySessionStore) {
    let context = context(&store);

    let result = context
        .sign_in(&Credentials::new("priya", "hunter2"))
        .await;

    assert!(matches!(
        result,
        Err(SessionError::Auth(AuthError::InvalidCredentials(_)))
    ));
    assert!(context.current().is_none());
    assert!(store.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_is_turned_away_from_user_management(
    store: InMemorySessionStore,
) -> Result<(), eyre::Report> {
    let session = sign_in(&context(&store), "priya").await?;
    let access = AccessControl::default();
    let users = RoutePath::new("/users")?;

    eyre::ensure!(
        access.guard_path(Some(&session), &users) == RouteDecision::Redirect(RoutePath::DASHBOARD),
        "project manager must be redirected to the dashboard"
    );
    eyre::ensure!(
        access.guard_path(Some(&session), &RoutePath::new("/tasks-management")?)
            == RouteDecision::Allow,
        "project manager must reach task management"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn persisted_session_is_restored_by_a_new_context(
    store: InMemorySessionStore,
) -> Result<(), eyre::Report> {
    let original = sign_in(&context(&store), "clara").await?;

    let restored = context(&store)
        .hydrate()?
        .ok_or_else(|| eyre::eyre!("expected a restored session"))?;

    eyre::ensure!(restored.user_id() == original.user_id(), "user mismatch");
    eyre::ensure!(restored.roles() == original.roles(), "roles mismatch");
    eyre::ensure!(
        navigation_for(restored.roles())
            .first()
            .is_some_and(|item| item.label == "Overview"),
        "client must see the client menu"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_out_and_forced_sign_out_clear_everything(
    store: InMemorySessionStore,
) -> Result<(), eyre::Report> {
    let context = context(&store);
    let access = AccessControl::default();

    sign_in(&context, "tess").await?;
    eyre::ensure!(context.sign_out()? == RoutePath::LOGIN, "sign out lands on login");
    eyre::ensure!(store.is_empty(), "sign out must clear storage");
    eyre::ensure!(
        access.guard_path(context.current().as_ref(), &RoutePath::DASHBOARD)
            == RouteDecision::Redirect(RoutePath::LOGIN),
        "signed-out users are sent to login"
    );

    sign_in(&context, "tess").await?;
    eyre::ensure!(context.force_sign_out() == RoutePath::LOGIN, "teardown lands on login");
    eyre::ensure!(context.current().is_none(), "teardown drops the session");
    eyre::ensure!(store.is_empty(), "teardown must clear storage");
    Ok(())
}
