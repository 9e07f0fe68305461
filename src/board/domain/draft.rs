//! Validated create and update payloads.
//!
//! Validation happens while building these values, so an invalid form never
//! reaches the backend.

use super::{BoardDomainError, ProjectId, TaskPriority, TaskStatus, task::validated_title};
use crate::access::domain::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    due_date: Option<DateTime<Utc>>,
    assigned_to_id: Option<UserId>,
}

impl NewTask {
    /// Creates a payload with the default status and priority.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Result<Self, BoardDomainError> {
        Ok(Self {
            project_id,
            title: validated_title(title.into())?,
            description: None,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            due_date: None,
            assigned_to_id: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assigned_to_id = Some(assignee);
        self
    }

    /// Returns the target project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assigned_to_id
    }
}

/// Partial update of a task; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, BoardDomainError> {
        self.title = Some(validated_title(title.into())?);
        Ok(self)
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the new title, if changed.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the new description, if changed.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new priority, if changed.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the new status, if changed.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the new due date, if changed.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns whether nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}
