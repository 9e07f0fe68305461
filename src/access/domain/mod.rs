//! Domain model for access control.
//!
//! Roles, sessions, route permissions and navigation menus are plain values;
//! every decision over them is a pure function.

mod error;
mod navigation;
mod permissions;
mod role;
mod route;
mod session;

pub use error::{AccessDomainError, ParseRoleError};
pub use navigation::{
    NAVIGATION_PRECEDENCE, NavIcon, NavItem, NavigationMenu, navigation_for,
    primary_navigation_menu,
};
pub use role::{Role, RoleSet};
pub use route::{
    HOME_ROUTE_PRECEDENCE, RouteDecision, RoutePath, RoutePermission, RouteTable, can_access,
    guard_route, resolve_home_route,
};
pub use session::{BearerToken, Credentials, Session, UserId, UserProfile};
