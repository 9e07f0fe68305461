//! Task status, priority and board columns.

use super::{ParseTaskPriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task workflow status.
///
/// Transitions are free: any status may follow any other, and completed
/// tasks may be reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    Review,
    /// Finished.
    Completed,
    /// Stuck on an external dependency. Has no board column.
    Blocked,
}

impl TaskStatus {
    /// Every status.
    pub const ALL: [Self; 5] = [
        Self::Todo,
        Self::InProgress,
        Self::Review,
        Self::Completed,
        Self::Blocked,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        }
    }

    /// Returns the human-readable label used in notices.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in progress",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        }
    }

    /// Returns the board column showing this status.
    #[must_use]
    pub const fn column(self) -> Option<BoardColumn> {
        match self {
            Self::Todo => Some(BoardColumn::Todo),
            Self::InProgress => Some(BoardColumn::InProgress),
            Self::Review => Some(BoardColumn::Review),
            Self::Completed => Some(BoardColumn::Completed),
            Self::Blocked => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "completed" => Ok(Self::Completed),
            "blocked" => Ok(Self::Blocked),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority, ordered from least to most pressing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Needs attention now.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Kanban column, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardColumn {
    /// "To Do".
    Todo,
    /// "In Progress".
    InProgress,
    /// "Review".
    Review,
    /// "Done".
    Completed,
}

impl BoardColumn {
    /// Every column, in display order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Completed];

    /// Returns the status a task takes when dropped into this column.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self {
            Self::Todo => TaskStatus::Todo,
            Self::InProgress => TaskStatus::InProgress,
            Self::Review => TaskStatus::Review,
            Self::Completed => TaskStatus::Completed,
        }
    }

    /// Returns the column heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Completed => "Done",
        }
    }
}
