//! Local board state and sequencing of optimistic transitions.

use super::{
    BoardColumn, BoardDomainError, Project, ProjectId, SearchQuery, Task, TaskId, TaskStatus,
};
use crate::access::domain::UserId;
use std::collections::HashMap;

/// Which tasks a board shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardScope {
    /// Every task of one project.
    Project(ProjectId),
    /// Tasks assigned to, created by or managed by one user, across projects.
    MyTasks(UserId),
}

/// Receipt for an optimistic status change still awaiting the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTicket {
    /// Task being moved.
    pub task_id: TaskId,
    /// Status before the move.
    pub previous: TaskStatus,
    /// Status requested.
    pub target: TaskStatus,
    /// Per-task sequence number; later moves carry larger numbers.
    pub sequence: u64,
}

/// Tasks of one column after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    /// Column.
    pub column: BoardColumn,
    /// Visible tasks, in board order.
    pub tasks: Vec<&'a Task>,
}

impl ColumnView<'_> {
    /// Returns the badge count of the column.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BoardEntry {
    task: Task,
    issued: u64,
    settled: u64,
}

impl BoardEntry {
    const fn new(task: Task) -> Self {
        Self {
            task,
            issued: 0,
            settled: 0,
        }
    }

    const fn in_flight(&self) -> bool {
        self.issued > self.settled
    }
}

/// In-memory copy of a board.
///
/// Status changes are applied locally first and tracked with a per-task
/// sequence number, so a response that arrives after a newer move of the
/// same task is recognised as stale and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    scope: BoardScope,
    entries: Vec<BoardEntry>,
    projects: HashMap<ProjectId, Project>,
}

impl TaskBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new(scope: BoardScope) -> Self {
        Self {
            scope,
            entries: Vec::new(),
            projects: HashMap::new(),
        }
    }

    /// Returns the board scope.
    #[must_use]
    pub const fn scope(&self) -> BoardScope {
        self.scope
    }

    /// Returns the number of tasks, including those hidden by search.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the board holds no task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates all tasks in board order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.entries.iter().map(|entry| &entry.task)
    }

    /// Returns a task by identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.entry(id).map(|entry| &entry.task)
    }

    /// Returns a project known to the board.
    #[must_use]
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// Replaces the known projects.
    pub fn set_projects(&mut self, projects: impl IntoIterator<Item = Project>) {
        self.projects = projects
            .into_iter()
            .map(|project| (project.id(), project))
            .collect();
    }

    /// Records or refreshes one project.
    pub fn upsert_project(&mut self, project: Project) {
        self.projects.insert(project.id(), project);
    }

    /// Replaces the task list with an authoritative fetch.
    ///
    /// Tasks that still have an optimistic move in flight keep their local
    /// status; that move's own response settles them.
    pub fn replace_all(&mut self, fetched: Vec<Task>) {
        let mut previous: HashMap<TaskId, BoardEntry> = self
            .entries
            .drain(..)
            .map(|entry| (entry.task.id(), entry))
            .collect();

        self.entries = fetched
            .into_iter()
            .map(|mut task| match previous.remove(&task.id()) {
                Some(old) if old.in_flight() => {
                    task.set_status(old.task.status());
                    BoardEntry {
                        task,
                        issued: old.issued,
                        settled: old.settled,
                    }
                }
                Some(old) => BoardEntry {
                    task,
                    issued: old.issued,
                    settled: old.settled,
                },
                None => BoardEntry::new(task),
            })
            .collect();
    }

    /// Applies a status change locally and returns its ticket.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not on the
    /// board.
    pub fn apply_status(
        &mut self,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<TransitionTicket, BoardDomainError> {
        let entry = self
            .entry_mut(id)
            .ok_or(BoardDomainError::TaskNotFound(id))?;
        let previous = entry.task.status();
        entry.task.set_status(status);
        entry.issued = entry.issued.saturating_add(1);
        Ok(TransitionTicket {
            task_id: id,
            previous,
            target: status,
            sequence: entry.issued,
        })
    }

    /// Returns whether `ticket` is the newest move of its task.
    #[must_use]
    pub fn is_current(&self, ticket: &TransitionTicket) -> bool {
        self.entry(ticket.task_id)
            .is_some_and(|entry| entry.issued == ticket.sequence)
    }

    /// Returns whether the task has a move awaiting the backend.
    #[must_use]
    pub fn has_pending_transition(&self, id: TaskId) -> bool {
        self.entry(id).is_some_and(BoardEntry::in_flight)
    }

    /// Accepts the backend's copy of a moved task.
    ///
    /// Returns `false`, leaving the board untouched, when a newer move of the
    /// same task superseded `ticket`.
    pub fn confirm(&mut self, ticket: &TransitionTicket, server_copy: Task) -> bool {
        self.settle(ticket);
        let Some(entry) = self.entry_mut(ticket.task_id) else {
            return false;
        };
        if entry.issued != ticket.sequence {
            return false;
        }
        entry.task = server_copy;
        true
    }

    /// Marks `ticket` resolved without accepting a server copy.
    pub fn settle(&mut self, ticket: &TransitionTicket) {
        if let Some(entry) = self.entry_mut(ticket.task_id) {
            entry.settled = entry.settled.max(ticket.sequence);
        }
    }

    /// Settles a failed move and restores the status it replaced.
    ///
    /// Returns `false`, leaving the status untouched, when a newer move of the
    /// same task superseded `ticket`.
    pub fn revert(&mut self, ticket: &TransitionTicket) -> bool {
        self.settle(ticket);
        let Some(entry) = self.entry_mut(ticket.task_id) else {
            return false;
        };
        if entry.issued != ticket.sequence {
            return false;
        }
        entry.task.set_status(ticket.previous);
        true
    }

    /// Bumps the cached comment count and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not on the
    /// board.
    pub fn increment_comment_count(&mut self, id: TaskId) -> Result<u32, BoardDomainError> {
        self.entry_mut(id)
            .map(|entry| entry.task.increment_comment_count())
            .ok_or(BoardDomainError::TaskNotFound(id))
    }

    /// Lowers the cached comment count and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not on the
    /// board.
    pub fn decrement_comment_count(&mut self, id: TaskId) -> Result<u32, BoardDomainError> {
        self.entry_mut(id)
            .map(|entry| entry.task.decrement_comment_count())
            .ok_or(BoardDomainError::TaskNotFound(id))
    }

    /// Returns the tasks matching `query`, in board order.
    #[must_use]
    pub fn visible_tasks(&self, query: &SearchQuery) -> Vec<&Task> {
        self.tasks()
            .filter(|task| query.matches(task, self.scope))
            .collect()
    }

    /// Groups the tasks matching `query` into the fixed columns.
    ///
    /// Counts reflect the filtered set. Blocked tasks appear in no column.
    #[must_use]
    pub fn columns(&self, query: &SearchQuery) -> Vec<ColumnView<'_>> {
        let visible = self.visible_tasks(query);
        BoardColumn::ALL
            .iter()
            .map(|column| ColumnView {
                column: *column,
                tasks: visible
                    .iter()
                    .copied()
                    .filter(|task| task.status().column() == Some(*column))
                    .collect(),
            })
            .collect()
    }

    fn entry(&self, id: TaskId) -> Option<&BoardEntry> {
        self.entries.iter().find(|entry| entry.task.id() == id)
    }

    fn entry_mut(&mut self, id: TaskId) -> Option<&mut BoardEntry> {
        self.entries.iter_mut().find(|entry| entry.task.id() == id)
    }
}
