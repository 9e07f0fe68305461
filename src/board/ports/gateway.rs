//! Backend ports for tasks, comments and projects.

use crate::access::domain::UserId;
use crate::board::domain::{
    CommentBody, CommentId, NewTask, Project, ProjectId, Task, TaskChanges, TaskComment, TaskId,
    TaskStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Task and comment operations offered by the backend.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Lists every task of a project.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend fails or rejects the request.
    async fn list_by_project(&self, project_id: ProjectId) -> GatewayResult<Vec<Task>>;

    /// Lists the tasks assigned to, created by or managed by a user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend fails or rejects the request.
    async fn list_for_user(&self, user_id: UserId) -> GatewayResult<Vec<Task>>;

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist.
    async fn get(&self, id: TaskId) -> GatewayResult<Task>;

    /// Creates a task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Rejected`] when the backend refuses the payload.
    async fn create(&self, task: &NewTask) -> GatewayResult<Task>;

    /// Applies a partial update and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, changes: &TaskChanges) -> GatewayResult<Task>;

    /// Changes only the status and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> GatewayResult<Task>;

    /// Sets or clears the assignee and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist.
    async fn assign(&self, id: TaskId, assignee: Option<UserId>) -> GatewayResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> GatewayResult<()>;

    /// Lists the comments of a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend fails or rejects the request.
    async fn list_comments(&self, task_id: TaskId) -> GatewayResult<Vec<TaskComment>>;

    /// Posts a comment as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist.
    async fn add_comment(&self, task_id: TaskId, body: &CommentBody)
    -> GatewayResult<TaskComment>;

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the comment does not exist.
    async fn delete_comment(&self, comment_id: CommentId) -> GatewayResult<()>;
}

/// Project lookups offered by the backend.
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// Fetches one project.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the project does not exist.
    async fn get_project(&self, id: ProjectId) -> GatewayResult<Project>;

    /// Lists the projects visible to the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend fails or rejects the request.
    async fn list_projects(&self) -> GatewayResult<Vec<Project>>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The backend rejected the bearer token.
    #[error("session is no longer authorized")]
    Unauthorized,

    /// The addressed record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("gateway transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns whether the error means the session must end.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
