//! In-memory Flow backend for workflow tests.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::access::domain::UserId;
use crate::board::{
    domain::{
        Assignee, CommentBody, CommentId, NewTask, Project, ProjectId, Task, TaskChanges,
        TaskComment, TaskId, TaskStatus,
    },
    ports::{GatewayError, GatewayResult, ProjectGateway, TaskGateway},
};

/// Thread-safe stand-in for the Flow backend.
///
/// Implements both [`TaskGateway`] and [`ProjectGateway`]. Clones share
/// state, so a test can keep a handle for seeding and inspection while a
/// service owns another.
pub struct InMemoryFlowBackend<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<BackendState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryFlowBackend<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryFlowBackend<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryFlowBackend")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct BackendState {
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
    comments: Vec<TaskComment>,
    users: HashMap<UserId, String>,
    acting_user: Option<UserId>,
    next_task_id: i64,
    next_comment_id: i64,
    status_updates: Vec<(TaskId, TaskStatus)>,
    requests: usize,
    faults: Faults,
}

#[derive(Debug, Default)]
struct Faults {
    status_updates: usize,
    comment_adds: usize,
    task_listing: bool,
    projects: HashSet<ProjectId>,
    session_rejected: bool,
}

impl InMemoryFlowBackend<DefaultClock> {
    /// Creates an empty backend using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryFlowBackend<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

fn injected(operation: &str) -> GatewayError {
    GatewayError::transport(std::io::Error::other(format!("injected {operation} failure")))
}

fn poisoned(err: impl ToString) -> GatewayError {
    GatewayError::transport(std::io::Error::other(err.to_string()))
}

fn annotated(state: &BackendState, task: &Task) -> Task {
    match (task.project_name(), state.projects.get(&task.project_id())) {
        (None, Some(project)) => task.clone().with_project_name(project.name()),
        _ => task.clone(),
    }
}

fn assignee_for(state: &BackendState, user: UserId) -> GatewayResult<Assignee> {
    state
        .users
        .get(&user)
        .map(|name| Assignee::new(user, name.clone()))
        .ok_or_else(|| GatewayError::Rejected(format!("unknown user: {user}")))
}

fn task_mut(state: &mut BackendState, id: TaskId) -> GatewayResult<&mut Task> {
    state
        .tasks
        .get_mut(&id)
        .ok_or_else(|| GatewayError::NotFound(format!("task {id}")))
}

impl<C> InMemoryFlowBackend<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty backend stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(BackendState {
                next_task_id: 1,
                next_comment_id: 1,
                ..BackendState::default()
            })),
            clock,
        }
    }

    fn seed(&self) -> RwLockWriteGuard<'_, BackendState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn inspect(&self) -> RwLockReadGuard<'_, BackendState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a request: counts it and fails it when the session is rejected.
    fn begin(&self) -> GatewayResult<RwLockWriteGuard<'_, BackendState>> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.requests = state.requests.saturating_add(1);
        if state.faults.session_rejected {
            return Err(GatewayError::Unauthorized);
        }
        Ok(state)
    }

    /// Stores or replaces a project.
    pub fn insert_project(&self, project: Project) {
        self.seed().projects.insert(project.id(), project);
    }

    /// Stores or replaces a task.
    pub fn insert_task(&self, task: Task) {
        let mut state = self.seed();
        state.next_task_id = state.next_task_id.max(task.id().value().saturating_add(1));
        state.tasks.insert(task.id(), task);
    }

    /// Registers a user that tasks can be assigned to.
    pub fn insert_user(&self, id: UserId, name: impl Into<String>) {
        self.seed().users.insert(id, name.into());
    }

    /// Sets the user new comments are attributed to.
    pub fn sign_in_as(&self, id: UserId) {
        self.seed().acting_user = Some(id);
    }

    /// Changes a task's status behind the client's back.
    pub fn set_status(&self, id: TaskId, status: TaskStatus) {
        if let Some(task) = self.seed().tasks.get_mut(&id) {
            task.set_status(status);
        }
    }

    /// Makes the next `count` status updates fail.
    pub fn fail_next_status_updates(&self, count: usize) {
        self.seed().faults.status_updates = count;
    }

    /// Makes the next `count` comment posts fail.
    pub fn fail_next_comment_adds(&self, count: usize) {
        self.seed().faults.comment_adds = count;
    }

    /// Makes every task listing fail until reset.
    pub fn fail_task_listing(&self, failing: bool) {
        self.seed().faults.task_listing = failing;
    }

    /// Makes task listings of one project fail.
    pub fn fail_project(&self, id: ProjectId) {
        self.seed().faults.projects.insert(id);
    }

    /// Rejects every further request as unauthorized.
    pub fn reject_session(&self) {
        self.seed().faults.session_rejected = true;
    }

    /// Returns the stored copy of a task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.inspect().tasks.get(&id).cloned()
    }

    /// Returns the stored comments of a task, in posting order.
    #[must_use]
    pub fn comments(&self, task_id: TaskId) -> Vec<TaskComment> {
        self.inspect()
            .comments
            .iter()
            .filter(|comment| comment.task_id == task_id)
            .cloned()
            .collect()
    }

    /// Returns every accepted status update, in arrival order.
    #[must_use]
    pub fn status_updates(&self) -> Vec<(TaskId, TaskStatus)> {
        self.inspect().status_updates.clone()
    }

    /// Returns the number of requests received, failed ones included.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.inspect().requests
    }
}

#[async_trait]
impl<C> TaskGateway for InMemoryFlowBackend<C>
where
    C: Clock + Send + Sync,
{
    async fn list_by_project(&self, project_id: ProjectId) -> GatewayResult<Vec<Task>> {
        let state = self.begin()?;
        if state.faults.task_listing || state.faults.projects.contains(&project_id) {
            return Err(injected("task listing"));
        }
        Ok(state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .map(|task| annotated(&state, task))
            .collect())
    }

    async fn list_for_user(&self, user_id: UserId) -> GatewayResult<Vec<Task>> {
        let state = self.begin()?;
        if state.faults.task_listing {
            return Err(injected("task listing"));
        }
        let managed = |task: &Task| {
            state
                .projects
                .get(&task.project_id())
                .is_some_and(|project| project.manager_id() == Some(user_id))
        };
        Ok(state
            .tasks
            .values()
            .filter(|task| task.is_assigned_to(user_id) || managed(task))
            .map(|task| annotated(&state, task))
            .collect())
    }

    async fn get(&self, id: TaskId) -> GatewayResult<Task> {
        let state = self.begin()?;
        state
            .tasks
            .get(&id)
            .map(|task| annotated(&state, task))
            .ok_or_else(|| GatewayError::NotFound(format!("task {id}")))
    }

    async fn create(&self, task: &NewTask) -> GatewayResult<Task> {
        let mut state = self.begin()?;
        if !state.projects.contains_key(&task.project_id()) {
            return Err(GatewayError::Rejected(format!(
                "unknown project: {}",
                task.project_id()
            )));
        }
        let id = TaskId::new(state.next_task_id);
        let mut created = Task::new(id, task.project_id(), task.title())
            .map_err(|err| GatewayError::Rejected(err.to_string()))?
            .with_priority(task.priority())
            .with_status(task.status());
        if let Some(description) = task.description() {
            created = created.with_description(description);
        }
        if let Some(due_date) = task.due_date() {
            created = created.with_due_date(due_date);
        }
        if let Some(user) = task.assignee() {
            created = created.with_assignee(assignee_for(&state, user)?);
        }
        created.stamp_created(self.clock.utc());
        state.next_task_id = state.next_task_id.saturating_add(1);
        state.tasks.insert(id, created.clone());
        Ok(annotated(&state, &created))
    }

    async fn update(&self, id: TaskId, changes: &TaskChanges) -> GatewayResult<Task> {
        let mut state = self.begin()?;
        let task = task_mut(&mut state, id)?;
        task.apply_changes(changes);
        task.touch(self.clock.utc());
        let updated = task.clone();
        Ok(annotated(&state, &updated))
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> GatewayResult<Task> {
        let mut state = self.begin()?;
        if state.faults.status_updates > 0 {
            state.faults.status_updates = state.faults.status_updates.saturating_sub(1);
            return Err(injected("status update"));
        }
        let task = task_mut(&mut state, id)?;
        task.set_status(status);
        task.touch(self.clock.utc());
        let updated = task.clone();
        state.status_updates.push((id, status));
        Ok(annotated(&state, &updated))
    }

    async fn assign(&self, id: TaskId, assignee: Option<UserId>) -> GatewayResult<Task> {
        let mut state = self.begin()?;
        let resolved = assignee
            .map(|user| assignee_for(&state, user))
            .transpose()?;
        let task = task_mut(&mut state, id)?;
        task.set_assignee(resolved);
        task.touch(self.clock.utc());
        let updated = task.clone();
        Ok(annotated(&state, &updated))
    }

    async fn delete(&self, id: TaskId) -> GatewayResult<()> {
        let mut state = self.begin()?;
        state
            .tasks
            .remove(&id)
            .ok_or_else(|| GatewayError::NotFound(format!("task {id}")))?;
        state.comments.retain(|comment| comment.task_id != id);
        Ok(())
    }

    async fn list_comments(&self, task_id: TaskId) -> GatewayResult<Vec<TaskComment>> {
        let state = self.begin()?;
        if !state.tasks.contains_key(&task_id) {
            return Err(GatewayError::NotFound(format!("task {task_id}")));
        }
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn add_comment(
        &self,
        task_id: TaskId,
        body: &CommentBody,
    ) -> GatewayResult<TaskComment> {
        let mut state = self.begin()?;
        if state.faults.comment_adds > 0 {
            state.faults.comment_adds = state.faults.comment_adds.saturating_sub(1);
            return Err(injected("comment"));
        }
        let author_id = state.acting_user.ok_or(GatewayError::Unauthorized)?;
        let author_name = state
            .users
            .get(&author_id)
            .cloned()
            .unwrap_or_else(|| author_id.to_string());
        task_mut(&mut state, task_id)?.increment_comment_count();

        let comment = TaskComment {
            id: CommentId::new(state.next_comment_id),
            task_id,
            author_id,
            author_name,
            content: body.as_str().to_owned(),
            created_at: self.clock.utc(),
        };
        state.next_comment_id = state.next_comment_id.saturating_add(1);
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, comment_id: CommentId) -> GatewayResult<()> {
        let mut state = self.begin()?;
        let position = state
            .comments
            .iter()
            .position(|comment| comment.id == comment_id)
            .ok_or_else(|| GatewayError::NotFound(format!("comment {comment_id}")))?;
        let removed = state.comments.remove(position);
        if let Some(task) = state.tasks.get_mut(&removed.task_id) {
            task.decrement_comment_count();
        }
        Ok(())
    }
}

#[async_trait]
impl<C> ProjectGateway for InMemoryFlowBackend<C>
where
    C: Clock + Send + Sync,
{
    async fn get_project(&self, id: ProjectId) -> GatewayResult<Project> {
        let state = self.begin()?;
        state
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("project {id}")))
    }

    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        let state = self.begin()?;
        Ok(state.projects.values().cloned().collect())
    }
}
