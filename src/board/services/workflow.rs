//! Board orchestration: loading, optimistic moves, task and comment edits.

use crate::access::{
    domain::{RoutePath, UserId},
    ports::SessionTeardown,
};
use crate::board::{
    domain::{
        Actor, BoardAction, BoardColumn, BoardDomainError, BoardScope, CommentBody, CommentId,
        CommentThread, Denial, NewTask, Notice, Project, ProjectId, Task, TaskBoard, TaskChanges,
        TaskComment, TaskId, TaskStatus, TransitionTicket, policy,
    },
    ports::{GatewayError, GatewayResult, Notifier, ProjectGateway, TaskGateway},
};
use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Input validation failed or the task is not on the board.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The backend failed or refused the request.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The actor's roles do not allow the action.
    #[error("not permitted to {0}")]
    NotPermitted(BoardAction),
    /// The owning project is inactive.
    #[error("project {0} is inactive")]
    ProjectInactive(ProjectId),
    /// The owning project is unknown to the board and the backend.
    #[error("project {0} is not loaded")]
    ProjectNotLoaded(ProjectId),
    /// A destructive action was not confirmed.
    #[error("action requires explicit confirmation")]
    ConfirmationRequired,
    /// The backend rejected the session; the user was signed out.
    #[error("session expired; sign in again at {redirect}")]
    SessionExpired {
        /// Route the user is sent to.
        redirect: RoutePath,
    },
}

/// Result type for board operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// How an optimistic status change ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The task already had the target status; nothing was sent.
    Unchanged,
    /// The backend accepted the change and the board holds its copy.
    Confirmed,
    /// The backend accepted the change but a newer move has since been made.
    Superseded,
    /// The backend failed; the board was reloaded from the backend.
    RolledBack,
}

/// User answer to a destructive action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user confirmed.
    Confirmed,
    /// The user backed out.
    Cancelled,
}

/// Task board orchestration service.
///
/// Owns the local [`TaskBoard`]. The board lock is only held between
/// backend calls, never across one.
pub struct BoardWorkflowService<G, N, T, C>
where
    G: TaskGateway + ProjectGateway,
    N: Notifier,
    T: SessionTeardown,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    notifier: Arc<N>,
    teardown: Arc<T>,
    clock: Arc<C>,
    board: Mutex<TaskBoard>,
}

impl<G, N, T, C> BoardWorkflowService<G, N, T, C>
where
    G: TaskGateway + ProjectGateway,
    N: Notifier,
    T: SessionTeardown,
    C: Clock + Send + Sync,
{
    /// Creates a service with an empty board for `scope`.
    #[must_use]
    pub fn new(
        scope: BoardScope,
        gateway: Arc<G>,
        notifier: Arc<N>,
        teardown: Arc<T>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            gateway,
            notifier,
            teardown,
            clock,
            board: Mutex::new(TaskBoard::new(scope)),
        }
    }

    fn board(&self) -> MutexGuard<'_, TaskBoard> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `read` against the current board.
    #[must_use]
    pub fn with_board<R>(&self, read: impl FnOnce(&TaskBoard) -> R) -> R {
        read(&self.board())
    }

    /// Returns a copy of the current board.
    #[must_use]
    pub fn snapshot(&self) -> TaskBoard {
        self.board().clone()
    }

    /// Loads the board's tasks and projects.
    ///
    /// On failure the board is left empty and a retryable notice is raised.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Gateway`] when the backend fails and
    /// [`WorkflowError::SessionExpired`] when it rejects the session.
    pub async fn load(&self) -> WorkflowResult<()> {
        let scope = self.board().scope();
        match self.fetch(scope).await {
            Ok((tasks, projects)) => {
                info!(?scope, tasks = tasks.len(), "board loaded");
                let mut board = self.board();
                board.set_projects(projects);
                board.replace_all(tasks);
                Ok(())
            }
            Err(err) => {
                *self.board() = TaskBoard::new(scope);
                Err(self.gateway_failure("Failed to load tasks", err))
            }
        }
    }

    /// Reloads the board after a mutation, keeping in-flight moves.
    async fn refresh(&self) -> GatewayResult<()> {
        let scope = self.board().scope();
        let (tasks, projects) = self.fetch(scope).await?;
        let mut board = self.board();
        board.set_projects(projects);
        board.replace_all(tasks);
        Ok(())
    }

    async fn fetch(&self, scope: BoardScope) -> GatewayResult<(Vec<Task>, Vec<Project>)> {
        match scope {
            BoardScope::Project(project_id) => {
                let project = self.gateway.get_project(project_id).await?;
                let tasks = self.gateway.list_by_project(project_id).await?;
                Ok((tasks, vec![project]))
            }
            BoardScope::MyTasks(user_id) => {
                let tasks = self.gateway.list_for_user(user_id).await?;
                let projects = self.gateway.list_projects().await?;
                Ok((tasks, projects))
            }
        }
    }

    /// Checks and applies a status change locally.
    ///
    /// Returns `None` when the task already has `status`; no request should
    /// be sent then.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotPermitted`] or
    /// [`WorkflowError::ProjectInactive`] when the move is refused, and
    /// [`WorkflowError::Domain`] when the task is not on the board.
    pub fn begin_transition(
        &self,
        actor: &Actor,
        task_id: TaskId,
        status: TaskStatus,
    ) -> WorkflowResult<Option<TransitionTicket>> {
        let mut board = self.board();
        let task = board
            .task(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        let project = board
            .project(task.project_id())
            .ok_or(WorkflowError::ProjectNotLoaded(task.project_id()))?;
        policy::check_move(task, project, actor)
            .map_err(|denial| refused(denial, BoardAction::Move, project.id()))?;
        if task.status() == status {
            debug!(%task_id, %status, "status unchanged, nothing to send");
            return Ok(None);
        }
        let ticket = board.apply_status(task_id, status)?;
        debug!(
            %task_id,
            from = %ticket.previous,
            to = %status,
            sequence = ticket.sequence,
            "status applied locally"
        );
        Ok(Some(ticket))
    }

    /// Reconciles the board with the backend's answer to a status change.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::SessionExpired`] when the backend rejected
    /// the session.
    pub async fn complete_transition(
        &self,
        ticket: TransitionTicket,
        response: GatewayResult<Task>,
    ) -> WorkflowResult<TransitionOutcome> {
        match response {
            Ok(server_copy) => {
                let status = server_copy.status();
                if !self.board().confirm(&ticket, server_copy) {
                    debug!(
                        task_id = %ticket.task_id,
                        sequence = ticket.sequence,
                        "stale status response ignored"
                    );
                    return Ok(TransitionOutcome::Superseded);
                }
                self.notifier.notify(Notice::success(
                    "Status Updated",
                    format!("Task moved to {}", status.label()),
                    self.clock.utc(),
                ));
                Ok(TransitionOutcome::Confirmed)
            }
            Err(err) => {
                self.board().revert(&ticket);
                if err.is_unauthorized() {
                    return Err(self.expire());
                }
                warn!(
                    task_id = %ticket.task_id,
                    error = %err,
                    "status update failed, reloading board"
                );
                if let Err(reload) = self.refresh().await {
                    warn!(error = %reload, "board reload after failed status update failed");
                }
                self.notify_failure(BoardAction::Move);
                Ok(TransitionOutcome::RolledBack)
            }
        }
    }

    /// Moves a task to a new status, optimistically.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::begin_transition`] and
    /// [`Self::complete_transition`]. A failed request is not an error: the
    /// board is rolled back and [`TransitionOutcome::RolledBack`] returned.
    pub async fn change_status(
        &self,
        actor: &Actor,
        task_id: TaskId,
        status: TaskStatus,
    ) -> WorkflowResult<TransitionOutcome> {
        let Some(ticket) = self.begin_transition(actor, task_id, status)? else {
            return Ok(TransitionOutcome::Unchanged);
        };
        let response = self.gateway.update_status(task_id, status).await;
        self.complete_transition(ticket, response).await
    }

    /// Handles a card dropped into `column`.
    ///
    /// # Errors
    ///
    /// See [`Self::change_status`].
    pub async fn drop_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        column: BoardColumn,
    ) -> WorkflowResult<TransitionOutcome> {
        self.change_status(actor, task_id, column.status()).await
    }

    /// Creates a task and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotPermitted`] or
    /// [`WorkflowError::ProjectInactive`] before any request is made, and
    /// [`WorkflowError::Gateway`] when the backend fails.
    pub async fn create_task(&self, actor: &Actor, draft: &NewTask) -> WorkflowResult<Task> {
        let project = self.project(draft.project_id()).await?;
        policy::check_create(&project, actor, draft.assignee())
            .map_err(|denial| refused(denial, BoardAction::Create, project.id()))?;

        let created = self
            .gateway
            .create(draft)
            .await
            .map_err(|err| self.action_failure(BoardAction::Create, err))?;
        info!(task_id = %created.id(), project_id = %project.id(), "task created");
        self.notifier.notify(Notice::success(
            "Task Created",
            format!("Created \"{}\"", created.title()),
            self.clock.utc(),
        ));
        self.reload_after(BoardAction::Create).await?;
        Ok(created)
    }

    /// Edits task fields and reloads the board.
    ///
    /// An empty change set returns the board copy without a request.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotPermitted`] or
    /// [`WorkflowError::ProjectInactive`] before any request is made, and
    /// [`WorkflowError::Gateway`] when the backend fails.
    pub async fn update_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        changes: &TaskChanges,
    ) -> WorkflowResult<Task> {
        let current = self.check_managed(actor, task_id, BoardAction::Edit)?;
        if changes.is_empty() {
            return Ok(current);
        }
        let updated = self
            .gateway
            .update(task_id, changes)
            .await
            .map_err(|err| self.action_failure(BoardAction::Edit, err))?;
        info!(%task_id, "task updated");
        self.notifier.notify(Notice::success(
            "Task Updated",
            format!("Updated \"{}\"", updated.title()),
            self.clock.utc(),
        ));
        self.reload_after(BoardAction::Edit).await?;
        Ok(updated)
    }

    /// Sets or clears a task's assignee and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotPermitted`] or
    /// [`WorkflowError::ProjectInactive`] before any request is made, and
    /// [`WorkflowError::Gateway`] when the backend fails.
    pub async fn assign_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        assignee: Option<UserId>,
    ) -> WorkflowResult<Task> {
        self.check_managed(actor, task_id, BoardAction::Assign)?;
        let updated = self
            .gateway
            .assign(task_id, assignee)
            .await
            .map_err(|err| self.action_failure(BoardAction::Assign, err))?;
        info!(%task_id, assignee = ?assignee, "task assigned");
        self.reload_after(BoardAction::Assign).await?;
        Ok(updated)
    }

    /// Deletes a task after explicit confirmation and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::ConfirmationRequired`] unless `confirmation`
    /// is [`Confirmation::Confirmed`], the permission errors before any
    /// request is made, and [`WorkflowError::Gateway`] when the backend fails.
    pub async fn delete_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        confirmation: Confirmation,
    ) -> WorkflowResult<()> {
        if confirmation != Confirmation::Confirmed {
            return Err(WorkflowError::ConfirmationRequired);
        }
        self.check_managed(actor, task_id, BoardAction::Delete)?;
        self.gateway
            .delete(task_id)
            .await
            .map_err(|err| self.action_failure(BoardAction::Delete, err))?;
        info!(%task_id, "task deleted");
        self.notifier
            .notify(Notice::success("Task Deleted", "Task deleted", self.clock.utc()));
        self.reload_after(BoardAction::Delete).await
    }

    /// Fetches the comment thread of a task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Gateway`] when the backend fails.
    pub async fn list_comments(&self, task_id: TaskId) -> WorkflowResult<CommentThread> {
        let fetched = self
            .gateway
            .list_comments(task_id)
            .await
            .map_err(|err| self.gateway_failure("Failed to load comments", err))?;
        Ok(CommentThread::from_fetched(task_id, fetched))
    }

    /// Posts a comment, bumping the cached count before the request.
    ///
    /// On failure the count is restored and the board reloaded.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Domain`] for blank text before any request,
    /// [`WorkflowError::ProjectInactive`] for inactive projects, and
    /// [`WorkflowError::Gateway`] when the backend fails.
    pub async fn add_comment(
        &self,
        task_id: TaskId,
        content: &str,
    ) -> WorkflowResult<TaskComment> {
        let body = CommentBody::new(content)?;
        {
            let mut board = self.board();
            let task = board
                .task(task_id)
                .ok_or(BoardDomainError::TaskNotFound(task_id))?;
            let project = board
                .project(task.project_id())
                .ok_or(WorkflowError::ProjectNotLoaded(task.project_id()))?;
            policy::check_comment(project)
                .map_err(|denial| refused(denial, BoardAction::Comment, project.id()))?;
            board.increment_comment_count(task_id)?;
        }

        match self.gateway.add_comment(task_id, &body).await {
            Ok(comment) => {
                info!(%task_id, comment_id = %comment.id, "comment added");
                Ok(comment)
            }
            Err(err) => {
                self.lower_comment_count(task_id);
                let failure = self.action_failure(BoardAction::Comment, err);
                if matches!(failure, WorkflowError::Gateway(_))
                    && let Err(reload) = self.refresh().await
                {
                    warn!(error = %reload, "board reload after failed comment failed");
                }
                Err(failure)
            }
        }
    }

    /// Deletes a comment and lowers the cached count.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotPermitted`] or
    /// [`WorkflowError::ProjectInactive`] before any request is made, and
    /// [`WorkflowError::Gateway`] when the backend fails.
    pub async fn delete_comment(
        &self,
        actor: &Actor,
        task_id: TaskId,
        comment_id: CommentId,
    ) -> WorkflowResult<()> {
        self.check_managed(actor, task_id, BoardAction::DeleteComment)?;
        self.gateway
            .delete_comment(comment_id)
            .await
            .map_err(|err| self.action_failure(BoardAction::DeleteComment, err))?;
        info!(%task_id, %comment_id, "comment deleted");
        self.lower_comment_count(task_id);
        Ok(())
    }

    /// Lowers the cached count; a task dropped by a concurrent reload is skipped.
    fn lower_comment_count(&self, task_id: TaskId) {
        if let Err(err) = self.board().decrement_comment_count(task_id) {
            debug!(%task_id, error = %err, "comment count not adjusted");
        }
    }

    /// Returns the project from the board, fetching it when unknown.
    async fn project(&self, project_id: ProjectId) -> WorkflowResult<Project> {
        let known = self.board().project(project_id).cloned();
        if let Some(project) = known {
            return Ok(project);
        }
        let fetched = self
            .gateway
            .get_project(project_id)
            .await
            .map_err(|err| match err {
                GatewayError::NotFound(_) => WorkflowError::ProjectNotLoaded(project_id),
                other => self.gateway_failure("Failed to load project", other),
            })?;
        self.board().upsert_project(fetched.clone());
        Ok(fetched)
    }

    /// Checks a managing action on a board task and returns the task.
    fn check_managed(
        &self,
        actor: &Actor,
        task_id: TaskId,
        action: BoardAction,
    ) -> WorkflowResult<Task> {
        let board = self.board();
        let task = board
            .task(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        let project = board
            .project(task.project_id())
            .ok_or(WorkflowError::ProjectNotLoaded(task.project_id()))?;
        policy::check_manage(project, actor)
            .map_err(|denial| refused(denial, action, project.id()))?;
        Ok(task.clone())
    }

    async fn reload_after(&self, action: BoardAction) -> WorkflowResult<()> {
        self.refresh().await.map_err(|err| {
            warn!(%action, error = %err, "board reload failed");
            self.gateway_failure("Failed to load tasks", err)
        })
    }

    fn action_failure(&self, action: BoardAction, err: GatewayError) -> WorkflowError {
        if err.is_unauthorized() {
            return self.expire();
        }
        warn!(%action, error = %err, "board action failed");
        self.notify_failure(action);
        WorkflowError::Gateway(err)
    }

    fn gateway_failure(&self, message: &str, err: GatewayError) -> WorkflowError {
        if err.is_unauthorized() {
            return self.expire();
        }
        warn!(error = %err, "{message}");
        self.notifier.notify(Notice::failure(message, self.clock.utc()));
        WorkflowError::Gateway(err)
    }

    fn notify_failure(&self, action: BoardAction) {
        self.notifier.notify(Notice::failure(
            format!("Failed to {action}"),
            self.clock.utc(),
        ));
    }

    fn expire(&self) -> WorkflowError {
        warn!("backend rejected the session, signing out");
        WorkflowError::SessionExpired {
            redirect: self.teardown.force_sign_out(),
        }
    }
}

const fn refused(denial: Denial, action: BoardAction, project_id: ProjectId) -> WorkflowError {
    match denial {
        Denial::ProjectInactive => WorkflowError::ProjectInactive(project_id),
        Denial::NotPermitted => WorkflowError::NotPermitted(action),
    }
}
