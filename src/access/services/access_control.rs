//! Route guarding over a declarative route table.

use crate::access::domain::{
    NavItem, RoleSet, RouteDecision, RoutePath, RouteTable, Session, can_access, guard_route,
    navigation_for, resolve_home_route,
};
use tracing::debug;

/// Access control service.
///
/// Every operation is pure and infallible: authorization problems resolve to
/// redirects, never to errors.
#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    routes: RouteTable,
}

impl AccessControl {
    /// Creates a service over `routes`.
    #[must_use]
    pub const fn new(routes: RouteTable) -> Self {
        Self { routes }
    }

    /// Returns the route table.
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// See [`can_access`].
    #[must_use]
    pub fn can_access(&self, user_roles: &RoleSet, required: Option<&RoleSet>) -> bool {
        can_access(user_roles, required)
    }

    /// See [`resolve_home_route`].
    #[must_use]
    pub fn resolve_home_route(&self, user_roles: &RoleSet) -> RoutePath {
        resolve_home_route(user_roles)
    }

    /// See [`guard_route`].
    #[must_use]
    pub fn guard_route(
        &self,
        session_roles: Option<&RoleSet>,
        required: Option<&RoleSet>,
    ) -> RouteDecision {
        guard_route(session_roles, required)
    }

    /// Guards navigation to a concrete path.
    ///
    /// The login entry point sends signed-in users to their home route, and
    /// paths missing from the table redirect instead of failing.
    #[must_use]
    pub fn guard_path(&self, session: Option<&Session>, path: &RoutePath) -> RouteDecision {
        let roles = session.map(Session::roles);
        let decision = if *path == RoutePath::LOGIN {
            roles.map_or(RouteDecision::Allow, |user_roles| {
                RouteDecision::Redirect(resolve_home_route(user_roles))
            })
        } else if let Some(entry) = self.routes.lookup(path) {
            guard_route(roles, entry.required_roles())
        } else {
            RouteDecision::Redirect(roles.map_or(RoutePath::LOGIN, resolve_home_route))
        };
        debug!(
            path = %path,
            roles = ?roles.map(ToString::to_string),
            decision = ?decision,
            "route guarded"
        );
        decision
    }

    /// See [`navigation_for`].
    #[must_use]
    pub fn navigation_for(&self, user_roles: &RoleSet) -> &'static [NavItem] {
        navigation_for(user_roles)
    }
}
