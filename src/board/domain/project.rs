//! Projects owning board tasks.

use super::{BoardDomainError, OrganizationId, ProjectId};
use crate::access::domain::UserId;
use serde::{Deserialize, Serialize};

/// Project record.
///
/// An inactive project freezes every task mutation; its tasks stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: String,
    #[serde(rename = "isActive")]
    active: bool,
    #[serde(default)]
    organization_id: Option<OrganizationId>,
    #[serde(default)]
    manager_id: Option<UserId>,
    #[serde(default)]
    member_ids: Vec<UserId>,
}

impl Project {
    /// Creates an active project with no manager or members.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyProjectName`] when the name is blank.
    pub fn new(id: ProjectId, name: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyProjectName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            active: true,
            organization_id: None,
            manager_id: None,
            member_ids: Vec::new(),
        })
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets the owning organization.
    #[must_use]
    pub const fn with_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Sets the project manager.
    #[must_use]
    pub const fn with_manager(mut self, manager_id: UserId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    /// Sets the member list.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.member_ids = members.into_iter().collect();
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the project accepts task mutations.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the owning organization, if known.
    #[must_use]
    pub const fn organization_id(&self) -> Option<OrganizationId> {
        self.organization_id
    }

    /// Returns the project manager, if any.
    #[must_use]
    pub const fn manager_id(&self) -> Option<UserId> {
        self.manager_id
    }

    /// Returns the project members.
    #[must_use]
    pub fn member_ids(&self) -> &[UserId] {
        &self.member_ids
    }
}
