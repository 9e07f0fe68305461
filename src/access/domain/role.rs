//! Roles and non-empty role sets.

use super::{AccessDomainError, ParseRoleError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Authorization label attached to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform-wide administrator.
    SuperAdmin,
    /// Administrator of a single organization.
    OrgAdmin,
    /// Manager of one or more projects.
    ProjectManager,
    /// Contributor working on assigned tasks.
    TeamMember,
    /// External client following project progress.
    Client,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::SuperAdmin,
        Self::OrgAdmin,
        Self::ProjectManager,
        Self::TeamMember,
        Self::Client,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::OrgAdmin => "ORG_ADMIN",
            Self::ProjectManager => "PROJECT_MANAGER",
            Self::TeamMember => "TEAM_MEMBER",
            Self::Client => "CLIENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "ORG_ADMIN" => Ok(Self::OrgAdmin),
            "PROJECT_MANAGER" => Ok(Self::ProjectManager),
            "TEAM_MEMBER" => Ok(Self::TeamMember),
            "CLIENT" => Ok(Self::Client),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Non-empty set of roles held by one user.
///
/// An empty role list means "no access", so it cannot be represented here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Creates a role set from any collection of roles.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDomainError::EmptyRoleSet`] when no role is given.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self, AccessDomainError> {
        let set: BTreeSet<Role> = roles.into_iter().collect();
        if set.is_empty() {
            return Err(AccessDomainError::EmptyRoleSet);
        }
        Ok(Self(set))
    }

    /// Creates a role set holding `first` and every role in `rest`.
    #[must_use]
    pub fn of(first: Role, rest: &[Role]) -> Self {
        let mut set = BTreeSet::from([first]);
        set.extend(rest.iter().copied());
        Self(set)
    }

    /// Returns whether the set holds `role`.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Returns whether the two sets share at least one role.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.0.iter().any(|role| other.contains(*role))
    }

    /// Iterates roles in their declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        Self::of(role, &[])
    }
}

impl TryFrom<Vec<Role>> for RoleSet {
    type Error = AccessDomainError;

    fn try_from(value: Vec<Role>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(value: RoleSet) -> Self {
        value.0.into_iter().collect()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for role in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(role.as_str())?;
            first = false;
        }
        Ok(())
    }
}
