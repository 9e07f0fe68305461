//! Case-insensitive board search.

use super::{BoardScope, Task};

/// Search text applied to the visible task set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Creates a query matched as a raw, case-insensitive substring.
    ///
    /// A whitespace-only query matches everything.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }
        Self(text.to_lowercase())
    }

    /// Returns the query that matches every task.
    #[must_use]
    pub fn everything() -> Self {
        Self::default()
    }

    /// Returns whether the query matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether `task` is visible under this query.
    ///
    /// Titles and assignee names always match; project names also match on
    /// cross-project boards.
    #[must_use]
    pub fn matches(&self, task: &Task, scope: BoardScope) -> bool {
        if self.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&self.0);
        hit(task.title())
            || task.assignee().is_some_and(|assignee| hit(&assignee.name))
            || (matches!(scope, BoardScope::MyTasks(_)) && task.project_name().is_some_and(hit))
    }
}
