//! Error types for task board validation and parsing.

use super::{CommentId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The comment is empty after trimming.
    #[error("comment must not be empty")]
    EmptyComment,

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The task is not on the board.
    #[error("task not found on board: {0}")]
    TaskNotFound(TaskId),

    /// A comment was appended to another task's thread.
    #[error("comment {comment_id} belongs to task {found}, not {expected}")]
    CommentTaskMismatch {
        /// Comment being appended.
        comment_id: CommentId,
        /// Task owning the thread.
        expected: TaskId,
        /// Task the comment refers to.
        found: TaskId,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
