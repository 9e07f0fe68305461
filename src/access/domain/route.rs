//! Route paths, route permissions and guard decisions.

use super::{AccessDomainError, Role, RoleSet};
use std::borrow::Cow;
use std::fmt;

/// Absolute navigable path such as `/dashboard`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePath(Cow<'static, str>);

impl RoutePath {
    /// Login entry point; also the target of every signed-out redirect.
    pub const LOGIN: Self = Self::from_static("/");
    /// Home of managing roles.
    pub const DASHBOARD: Self = Self::from_static("/dashboard");
    /// Home of clients.
    pub const CLIENT_OVERVIEW: Self = Self::from_static("/client/overview");
    /// Home of team members.
    pub const TEAM_MEMBER_TASKS: Self = Self::from_static("/team-member/tasks");

    /// Wraps a compile-time path literal.
    #[must_use]
    pub const fn from_static(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Creates a validated route path.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDomainError::InvalidRoutePath`] when the value does not
    /// start with `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, AccessDomainError> {
        let raw = value.into();
        if !raw.starts_with('/') {
            return Err(AccessDomainError::InvalidRoutePath(raw));
        }
        Ok(Self(Cow::Owned(raw)))
    }

    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path segments with any query or fragment removed.
    fn segments(&self) -> impl Iterator<Item = &str> {
        let path = self.as_str();
        let end = path.find(['?', '#']).unwrap_or(path.len());
        path.get(..end)
            .unwrap_or(path)
            .split('/')
            .filter(|segment| !segment.is_empty())
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of guarding a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The view may be rendered.
    Allow,
    /// The caller must be sent elsewhere.
    Redirect(RoutePath),
}

/// Ordered precedence table for home routes. The first role held wins.
pub const HOME_ROUTE_PRECEDENCE: [(Role, RoutePath); 2] = [
    (Role::Client, RoutePath::CLIENT_OVERVIEW),
    (Role::TeamMember, RoutePath::TEAM_MEMBER_TASKS),
];

/// Returns whether `user_roles` satisfies `required`.
///
/// An absent requirement admits any authenticated user.
#[must_use]
pub fn can_access(user_roles: &RoleSet, required: Option<&RoleSet>) -> bool {
    required.is_none_or(|required_roles| user_roles.intersects(required_roles))
}

/// Resolves the landing route for a role set using
/// [`HOME_ROUTE_PRECEDENCE`], falling back to the dashboard.
#[must_use]
pub fn resolve_home_route(user_roles: &RoleSet) -> RoutePath {
    HOME_ROUTE_PRECEDENCE
        .iter()
        .find(|(role, _)| user_roles.contains(*role))
        .map_or(RoutePath::DASHBOARD, |(_, path)| path.clone())
}

/// Decides whether a session may enter a view guarded by `required`.
///
/// A missing session always redirects to the login entry point, whatever
/// the requirement.
#[must_use]
pub fn guard_route(session_roles: Option<&RoleSet>, required: Option<&RoleSet>) -> RouteDecision {
    let Some(user_roles) = session_roles else {
        return RouteDecision::Redirect(RoutePath::LOGIN);
    };
    if can_access(user_roles, required) {
        RouteDecision::Allow
    } else {
        RouteDecision::Redirect(resolve_home_route(user_roles))
    }
}

/// Guard entry for one navigable path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePermission {
    pattern: RoutePath,
    required_roles: Option<RoleSet>,
}

impl RoutePermission {
    /// Creates an entry open to any authenticated user.
    #[must_use]
    pub const fn authenticated(pattern: RoutePath) -> Self {
        Self {
            pattern,
            required_roles: None,
        }
    }

    /// Creates an entry restricted to `roles`.
    #[must_use]
    pub const fn restricted(pattern: RoutePath, roles: RoleSet) -> Self {
        Self {
            pattern,
            required_roles: Some(roles),
        }
    }

    /// Returns the path pattern; `:name` segments match any value.
    #[must_use]
    pub const fn pattern(&self) -> &RoutePath {
        &self.pattern
    }

    /// Returns the allow-list, or `None` when any authenticated user may
    /// enter.
    #[must_use]
    pub const fn required_roles(&self) -> Option<&RoleSet> {
        self.required_roles.as_ref()
    }

    /// Returns whether `path` matches this entry's pattern.
    #[must_use]
    pub fn matches(&self, path: &RoutePath) -> bool {
        let mut expected = self.pattern.segments();
        let mut actual = path.segments();
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(pattern), Some(segment)) => {
                    if !pattern.starts_with(':') && pattern != segment {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

/// Declarative table of guarded routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RoutePermission>,
}

impl RouteTable {
    /// Creates a table from explicit entries. Earlier entries win.
    #[must_use]
    pub const fn new(entries: Vec<RoutePermission>) -> Self {
        Self { entries }
    }

    /// Returns the route table of the Flow dashboard.
    #[must_use]
    pub fn application() -> Self {
        use Role::{Client, OrgAdmin, ProjectManager, SuperAdmin, TeamMember};

        let open = |path| RoutePermission::authenticated(RoutePath::from_static(path));
        let only = |path, first, rest: &[Role]| {
            RoutePermission::restricted(RoutePath::from_static(path), RoleSet::of(first, rest))
        };

        Self::new(vec![
            open("/dashboard"),
            open("/projects"),
            open("/projects/:id"),
            open("/tasks"),
            open("/team"),
            open("/reset-password"),
            only("/users", SuperAdmin, &[OrgAdmin]),
            only("/organizations", SuperAdmin, &[]),
            only("/tasks-management", SuperAdmin, &[OrgAdmin, ProjectManager]),
            only("/projects-management", SuperAdmin, &[OrgAdmin, ProjectManager]),
            only("/client/overview", Client, &[]),
            only("/client/projects", Client, &[]),
            only("/team-member/tasks", TeamMember, &[]),
            only("/team-member/calendar", TeamMember, &[]),
            only("/settings", SuperAdmin, &[]),
        ])
    }

    /// Finds the first entry matching `path`.
    #[must_use]
    pub fn lookup(&self, path: &RoutePath) -> Option<&RoutePermission> {
        self.entries.iter().find(|entry| entry.matches(path))
    }

    /// Returns every entry in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[RoutePermission] {
        &self.entries
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::application()
    }
}
