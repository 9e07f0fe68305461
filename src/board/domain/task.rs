//! Task records as served by the backend.

use super::{BoardDomainError, ProjectId, TaskChanges, TaskId, TaskPriority, TaskStatus};
use crate::access::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weak reference to the user a task is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignee {
    /// Assigned user.
    pub id: UserId,
    /// Assigned user's display name.
    pub name: String,
}

impl Assignee {
    /// Creates an assignee reference.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Task card on a board.
///
/// On the wire the assignee is flattened into `assignedToId` and
/// `assignedToName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    project_name: Option<String>,
    title: String,
    description: String,
    priority: TaskPriority,
    status: TaskStatus,
    assignee: Option<Assignee>,
    due_date: Option<DateTime<Utc>>,
    comment_count: u32,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

/// Backend task record. Nullable columns arrive as `null`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    project_id: ProjectId,
    #[serde(default)]
    project_name: Option<String>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<TaskPriority>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default)]
    assigned_to_id: Option<UserId>,
    #[serde(default)]
    assigned_to_name: Option<String>,
    #[serde(default)]
    due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    comment_count: Option<u32>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let assignee = record.assigned_to_id.map(|id| Assignee {
            id,
            name: record.assigned_to_name.unwrap_or_default(),
        });
        Self {
            id: record.id,
            project_id: record.project_id,
            project_name: record.project_name,
            title: record.title,
            description: record.description.unwrap_or_default(),
            priority: record.priority.unwrap_or_default(),
            status: record.status.unwrap_or_default(),
            assignee,
            due_date: record.due_date,
            comment_count: record.comment_count.unwrap_or_default(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let (assigned_to_id, assigned_to_name) = task
            .assignee
            .map(|assignee| (assignee.id, assignee.name))
            .unzip();
        Self {
            id: task.id,
            project_id: task.project_id,
            project_name: task.project_name,
            title: task.title,
            description: Some(task.description),
            priority: Some(task.priority),
            status: Some(task.status),
            assigned_to_id,
            assigned_to_name,
            due_date: task.due_date,
            comment_count: Some(task.comment_count),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl Task {
    /// Creates a task in the default `todo` status with `medium` priority.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        id: TaskId,
        project_id: ProjectId,
        title: impl Into<String>,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id,
            project_id,
            project_name: None,
            title: validated_title(title.into())?,
            description: String::new(),
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            assignee: None,
            due_date: None,
            comment_count: 0,
            created_at: None,
            updated_at: None,
        })
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the owning project's name.
    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the cached comment count.
    #[must_use]
    pub const fn with_comment_count(mut self, count: u32) -> Self {
        self.comment_count = count;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the owning project's name, when the backend included it.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
    }

    /// Returns whether `user` is the assignee.
    #[must_use]
    pub fn is_assigned_to(&self, user: UserId) -> bool {
        self.assignee.as_ref().is_some_and(|assignee| assignee.id == user)
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the cached comment count.
    #[must_use]
    pub const fn comment_count(&self) -> u32 {
        self.comment_count
    }

    /// Returns the backend's creation timestamp, if known.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the backend's last-modified timestamp, if known.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub(crate) const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub(crate) fn set_assignee(&mut self, assignee: Option<Assignee>) {
        self.assignee = assignee;
    }

    pub(crate) const fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    pub(crate) const fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    pub(crate) fn apply_changes(&mut self, changes: &TaskChanges) {
        if let Some(title) = changes.title() {
            title.clone_into(&mut self.title);
        }
        if let Some(description) = changes.description() {
            description.clone_into(&mut self.description);
        }
        if let Some(priority) = changes.priority() {
            self.priority = priority;
        }
        if let Some(status) = changes.status() {
            self.status = status;
        }
        if let Some(due_date) = changes.due_date() {
            self.due_date = Some(due_date);
        }
    }

    pub(crate) const fn increment_comment_count(&mut self) -> u32 {
        self.comment_count = self.comment_count.saturating_add(1);
        self.comment_count
    }

    pub(crate) const fn decrement_comment_count(&mut self) -> u32 {
        self.comment_count = self.comment_count.saturating_sub(1);
        self.comment_count
    }
}

pub(super) fn validated_title(title: String) -> Result<String, BoardDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
