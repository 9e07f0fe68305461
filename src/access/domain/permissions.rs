//! Fine-grained action permissions derived from a role set.

use super::{Role, RoleSet};

impl RoleSet {
    /// Returns whether the holder manages tasks: creating, editing,
    /// reassigning and deleting any task of a project.
    ///
    /// Holding `TEAM_MEMBER` or `CLIENT` withdraws this, even alongside a
    /// managing role.
    #[must_use]
    pub fn can_manage_tasks(&self) -> bool {
        !self.contains(Role::TeamMember) && !self.contains(Role::Client)
    }

    /// Returns whether the holder may administer user accounts.
    #[must_use]
    pub fn can_manage_users(&self) -> bool {
        self.contains(Role::SuperAdmin) || self.contains(Role::OrgAdmin)
    }

    /// Returns whether the holder may administer organizations.
    #[must_use]
    pub fn can_manage_organizations(&self) -> bool {
        self.contains(Role::SuperAdmin)
    }

    /// Returns whether the holder may change system settings.
    #[must_use]
    pub fn can_manage_settings(&self) -> bool {
        self.contains(Role::SuperAdmin)
    }

    /// Returns whether the holder may create and configure projects.
    #[must_use]
    pub fn can_manage_projects(&self) -> bool {
        self.contains(Role::SuperAdmin)
            || self.contains(Role::OrgAdmin)
            || self.contains(Role::ProjectManager)
    }
}
