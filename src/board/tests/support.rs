//! Shared builders for board tests.

use crate::access::domain::{Role, RoleSet, RoutePath, UserId};
use crate::access::ports::SessionTeardown;
use crate::board::domain::{Actor, Assignee, Project, ProjectId, Task, TaskId, TaskStatus};
use std::sync::atomic::{AtomicUsize, Ordering};

pub(super) const PROJECT: ProjectId = ProjectId::new(10);
pub(super) const MANAGER: UserId = UserId::new(1);
pub(super) const MEMBER: UserId = UserId::new(2);
pub(super) const CLIENT: UserId = UserId::new(3);

pub(super) fn project(active: bool) -> Project {
    Project::new(PROJECT, "Apollo")
        .expect("valid project")
        .with_active(active)
        .with_manager(MANAGER)
        .with_members([MEMBER])
}

pub(super) fn task(id: i64, title: &str, status: TaskStatus) -> Task {
    Task::new(TaskId::new(id), PROJECT, title)
        .expect("valid task")
        .with_status(status)
}

pub(super) fn assigned(task: Task, user: UserId, name: &str) -> Task {
    task.with_assignee(Assignee::new(user, name))
}

pub(super) fn manager() -> Actor {
    Actor::new(MANAGER, RoleSet::from(Role::ProjectManager))
}

pub(super) fn member() -> Actor {
    Actor::new(MEMBER, RoleSet::from(Role::TeamMember))
}

pub(super) fn client() -> Actor {
    Actor::new(CLIENT, RoleSet::from(Role::Client))
}

/// Teardown hook counting forced sign-outs.
#[derive(Debug, Default)]
pub(super) struct CountingTeardown {
    calls: AtomicUsize,
}

impl CountingTeardown {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SessionTeardown for CountingTeardown {
    fn force_sign_out(&self) -> RoutePath {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RoutePath::LOGIN
    }
}
