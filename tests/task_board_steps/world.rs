//! Shared world state for task board BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use flowboard::{
    access::{
        domain::{Role, RoleSet, RoutePath, UserId},
        ports::SessionTeardown,
    },
    board::{
        adapters::memory::{InMemoryFlowBackend, RecordingNotifier},
        domain::{Actor, BoardScope, Project, ProjectId, SearchQuery, TaskId, TaskStatus},
        services::{BoardWorkflowService, TransitionOutcome, WorkflowResult},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Project shown on the scenario board.
pub const PROJECT: ProjectId = ProjectId::new(1);

/// Team member acting in scenarios.
pub const MEMBER: UserId = UserId::new(2);

/// Display name of [`MEMBER`].
pub const MEMBER_NAME: &str = "Tess";

/// Teardown hook that only reports the login route.
#[derive(Debug, Default)]
pub struct LoginRedirect;

impl SessionTeardown for LoginRedirect {
    fn force_sign_out(&self) -> RoutePath {
        RoutePath::LOGIN
    }
}

/// Service type used by the BDD world.
pub type TestBoardService =
    BoardWorkflowService<InMemoryFlowBackend, RecordingNotifier, LoginRedirect, DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub backend: InMemoryFlowBackend,
    pub notifier: Arc<RecordingNotifier>,
    pub service: TestBoardService,
    pub task_ids: HashMap<String, TaskId>,
    pub query: SearchQuery,
    pub last_move: Option<WorkflowResult<TransitionOutcome>>,
}

impl TaskBoardWorld {
    /// Creates a world with one active project and no tasks.
    #[must_use]
    pub fn new() -> Self {
        let backend = InMemoryFlowBackend::new();
        backend.insert_project(
            Project::new(PROJECT, "Apollo")
                .expect("valid scenario project")
                .with_members([MEMBER]),
        );
        backend.insert_user(MEMBER, MEMBER_NAME);
        let notifier = Arc::new(RecordingNotifier::new());
        let service = BoardWorkflowService::new(
            BoardScope::Project(PROJECT),
            Arc::new(backend.clone()),
            Arc::clone(&notifier),
            Arc::new(LoginRedirect),
            Arc::new(DefaultClock),
        );

        Self {
            backend,
            notifier,
            service,
            task_ids: HashMap::new(),
            query: SearchQuery::everything(),
            last_move: None,
        }
    }

    /// Returns the team member acting in scenarios.
    #[must_use]
    pub fn member() -> Actor {
        Actor::new(MEMBER, RoleSet::from(Role::TeamMember))
    }

    /// Resolves a scenario task title to its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no task with `title` was seeded.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no scenario task titled {title}"))
    }

    /// Returns the board status of the task titled `title`.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is not on the board.
    pub fn board_status(&self, title: &str) -> Result<TaskStatus, eyre::Report> {
        let id = self.task_id(title)?;
        self.service
            .with_board(|board| board.task(id).map(|task| task.status()))
            .ok_or_else(|| eyre::eyre!("task {title} is not on the board"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
