//! Task comments and per-task comment threads.

use super::{BoardDomainError, CommentId, TaskId};
use crate::access::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated comment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentBody(String);

impl CommentBody {
    /// Creates a comment body.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyComment`] when the text is blank.
    pub fn new(content: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = content.into();
        if raw.trim().is_empty() {
            return Err(BoardDomainError::EmptyComment);
        }
        Ok(Self(raw))
    }

    /// Returns the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Comment posted on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    /// Comment identifier.
    pub id: CommentId,
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Author.
    pub author_id: UserId,
    /// Author's display name.
    pub author_name: String,
    /// Comment text.
    pub content: String,
    /// When the backend recorded the comment.
    pub created_at: DateTime<Utc>,
}

/// Append-only, chronologically ordered comment log of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    task_id: TaskId,
    comments: Vec<TaskComment>,
}

impl CommentThread {
    /// Creates an empty thread.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            comments: Vec::new(),
        }
    }

    /// Builds a thread from a backend listing, ordering comments by
    /// creation time and keeping listing order for ties. Comments of other
    /// tasks are dropped.
    #[must_use]
    pub fn from_fetched(task_id: TaskId, fetched: Vec<TaskComment>) -> Self {
        let mut comments: Vec<TaskComment> = fetched
            .into_iter()
            .filter(|comment| comment.task_id == task_id)
            .collect();
        comments.sort_by_key(|comment| comment.created_at);
        Self { task_id, comments }
    }

    /// Appends a newly posted comment.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::CommentTaskMismatch`] when the comment
    /// belongs to another task.
    pub fn append(&mut self, comment: TaskComment) -> Result<(), BoardDomainError> {
        if comment.task_id != self.task_id {
            return Err(BoardDomainError::CommentTaskMismatch {
                comment_id: comment.id,
                expected: self.task_id,
                found: comment.task_id,
            });
        }
        self.comments.push(comment);
        Ok(())
    }

    /// Removes a deleted comment, returning whether it was present.
    pub fn remove(&mut self, comment_id: CommentId) -> bool {
        let before = self.comments.len();
        self.comments.retain(|comment| comment.id != comment_id);
        self.comments.len() != before
    }

    /// Returns the task this thread belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[TaskComment] {
        &self.comments
    }

    /// Returns the number of comments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Returns whether the thread has no comments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
