//! Who may change what on a board.
//!
//! Every rule first requires the owning project to be active; an inactive
//! project freezes all task mutation for every role.

use super::{Project, Task};
use crate::access::domain::{Role, RoleSet, Session, UserId};
use std::fmt;

/// User acting on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Acting user.
    pub id: UserId,
    /// Acting user's roles.
    pub roles: RoleSet,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(id: UserId, roles: RoleSet) -> Self {
        Self { id, roles }
    }

    /// Returns the actor behind a session.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self::new(session.user_id(), session.roles().clone())
    }
}

/// Board mutations subject to permission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardAction {
    /// Change a task's status.
    Move,
    /// Create a task.
    Create,
    /// Edit task fields.
    Edit,
    /// Change a task's assignee.
    Assign,
    /// Delete a task.
    Delete,
    /// Post a comment.
    Comment,
    /// Delete a comment.
    DeleteComment,
}

impl BoardAction {
    /// Returns the verb phrase used in notices and errors.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Move => "update task status",
            Self::Create => "create task",
            Self::Edit => "update task",
            Self::Assign => "assign task",
            Self::Delete => "delete task",
            Self::Comment => "add comment",
            Self::DeleteComment => "delete comment",
        }
    }
}

impl fmt::Display for BoardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Reason an action is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denial {
    /// The owning project is inactive.
    ProjectInactive,
    /// The actor's roles do not allow the action.
    NotPermitted,
}

fn require_active(project: &Project) -> Result<(), Denial> {
    if project.is_active() {
        Ok(())
    } else {
        Err(Denial::ProjectInactive)
    }
}

fn require(allowed: bool) -> Result<(), Denial> {
    if allowed {
        Ok(())
    } else {
        Err(Denial::NotPermitted)
    }
}

/// Checks a status change by drag-and-drop or explicit edit.
///
/// Managing roles may move any task; everyone else only tasks assigned to
/// them.
///
/// # Errors
///
/// Returns the [`Denial`] explaining the refusal.
pub fn check_move(task: &Task, project: &Project, actor: &Actor) -> Result<(), Denial> {
    require_active(project)?;
    require(actor.roles.can_manage_tasks() || task.is_assigned_to(actor.id))
}

/// Returns whether the drag affordance is enabled for `task`.
#[must_use]
pub fn can_drag_task(task: &Task, project: &Project, actor: &Actor) -> bool {
    check_move(task, project, actor).is_ok()
}

/// Checks task creation.
///
/// Managing roles may create any task; team members only tasks assigned to
/// themselves. Clients never create tasks.
///
/// # Errors
///
/// Returns the [`Denial`] explaining the refusal.
pub fn check_create(
    project: &Project,
    actor: &Actor,
    assignee: Option<UserId>,
) -> Result<(), Denial> {
    require_active(project)?;
    let self_assigned_member =
        actor.roles.contains(Role::TeamMember) && assignee == Some(actor.id);
    require(
        !actor.roles.contains(Role::Client)
            && (actor.roles.can_manage_tasks() || self_assigned_member),
    )
}

/// Checks editing, reassigning or deleting tasks and deleting comments.
///
/// # Errors
///
/// Returns the [`Denial`] explaining the refusal.
pub fn check_manage(project: &Project, actor: &Actor) -> Result<(), Denial> {
    require_active(project)?;
    require(actor.roles.can_manage_tasks())
}

/// Checks posting a comment. Any signed-in role may comment on an active
/// project.
///
/// # Errors
///
/// Returns [`Denial::ProjectInactive`] for inactive projects.
pub fn check_comment(project: &Project) -> Result<(), Denial> {
    require_active(project)
}
