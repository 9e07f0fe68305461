//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use flowboard::{
    access::{
        adapters::memory::{InMemorySessionStore, StaticAuthenticator},
        domain::{Credentials, Role, Session, UserId},
        ports::AuthenticatedUser,
        services::SessionContext,
    },
    board::{
        adapters::memory::{InMemoryFlowBackend, RecordingNotifier},
        domain::{Assignee, BoardScope, Project, ProjectId, Task, TaskId, TaskStatus},
        services::BoardWorkflowService,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Password shared by every seeded account.
pub const PASSWORD: &str = "correct horse";

/// Project used by the seeded board.
pub const APOLLO: ProjectId = ProjectId::new(10);

/// Project manager of [`APOLLO`].
pub const PRIYA: UserId = UserId::new(1);
/// Team member on [`APOLLO`].
pub const TESS: UserId = UserId::new(2);
/// Client account.
pub const CLARA: UserId = UserId::new(3);
/// Platform administrator.
pub const ADA: UserId = UserId::new(4);

/// Session context wired to in-memory adapters.
pub type TestContext = SessionContext<InMemorySessionStore, StaticAuthenticator, DefaultClock>;

/// Board service signing out through [`TestContext`].
pub type TestBoard =
    BoardWorkflowService<InMemoryFlowBackend, RecordingNotifier, TestContext, DefaultClock>;

fn account(id: UserId, username: &str, roles: Vec<Role>) -> AuthenticatedUser {
    AuthenticatedUser {
        token: format!("token-{username}"),
        id,
        username: username.to_owned(),
        email: format!("{username}@flow.example"),
        roles,
    }
}

/// Authenticator knowing one account per role family.
#[must_use]
pub fn authenticator() -> StaticAuthenticator {
    StaticAuthenticator::new()
        .with_account(PASSWORD, account(PRIYA, "priya", vec![Role::ProjectManager]))
        .with_account(PASSWORD, account(TESS, "tess", vec![Role::TeamMember]))
        .with_account(PASSWORD, account(CLARA, "clara", vec![Role::Client]))
        .with_account(PASSWORD, account(ADA, "ada", vec![Role::SuperAdmin]))
}

/// Provides a fresh session store for each test.
#[fixture]
pub fn store() -> InMemorySessionStore {
    InMemorySessionStore::new()
}

/// Builds a signed-out context over `store`.
#[must_use]
pub fn context(store: &InMemorySessionStore) -> Arc<TestContext> {
    Arc::new(SessionContext::new(
        Arc::new(store.clone()),
        Arc::new(authenticator()),
        Arc::new(DefaultClock),
    ))
}

/// Signs `login` in with the shared password.
///
/// # Errors
///
/// Returns an error if the sign-in is rejected.
pub async fn sign_in(context: &TestContext, login: &str) -> Result<Session, eyre::Report> {
    let signed_in = context
        .sign_in(&Credentials::new(login, PASSWORD))
        .await
        .map_err(|err| eyre::eyre!("sign in as {login}: {err}"))?;
    Ok(signed_in.session)
}

/// Provides a backend seeded with the Apollo project and its tasks.
#[fixture]
pub fn backend() -> InMemoryFlowBackend {
    let backend = InMemoryFlowBackend::new();
    backend.insert_project(
        Project::new(APOLLO, "Apollo")
            .expect("valid project")
            .with_manager(PRIYA)
            .with_members([TESS]),
    );
    backend.insert_user(PRIYA, "priya");
    backend.insert_user(TESS, "tess");
    backend.insert_task(
        Task::new(TaskId::new(1), APOLLO, "Implement authentication")
            .expect("valid task")
            .with_status(TaskStatus::InProgress)
            .with_assignee(Assignee::new(TESS, "tess")),
    );
    backend.insert_task(
        Task::new(TaskId::new(2), APOLLO, "Design UI")
            .expect("valid task")
            .with_status(TaskStatus::Todo),
    );
    backend
}

/// Builds a board service for `scope` that signs out through `context`.
#[must_use]
pub fn board(
    backend: &InMemoryFlowBackend,
    context: &Arc<TestContext>,
    scope: BoardScope,
) -> (TestBoard, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let service = BoardWorkflowService::new(
        scope,
        Arc::new(backend.clone()),
        Arc::clone(&notifier),
        Arc::clone(context),
        Arc::new(DefaultClock),
    );
    (service, notifier)
}
