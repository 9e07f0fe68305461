//! Role-specific navigation menus.
//!
//! Menus are fixed tables selected by a single primary role. They are never
//! merged across roles; route guarding is what honours the full role set.

use super::{Role, RoleSet, RoutePath};
use serde::Serialize;

/// Icon key rendered next to a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavIcon {
    /// Dashboard or overview.
    Dashboard,
    /// Project list.
    Projects,
    /// Task list.
    Tasks,
    /// People.
    Users,
    /// Organizations.
    Organizations,
    /// System settings.
    Settings,
    /// Calendar.
    Calendar,
}

/// One entry of a navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Visible label.
    pub label: &'static str,
    /// Target path.
    pub path: RoutePath,
    /// Icon key.
    pub icon: NavIcon,
}

const fn item(label: &'static str, path: &'static str, icon: NavIcon) -> NavItem {
    NavItem {
        label,
        path: RoutePath::from_static(path),
        icon,
    }
}

static DEFAULT_MENU: [NavItem; 4] = [
    item("Dashboard", "/dashboard", NavIcon::Dashboard),
    item("Projects", "/projects", NavIcon::Projects),
    item("Tasks", "/tasks", NavIcon::Tasks),
    item("Team", "/team", NavIcon::Users),
];

static CLIENT_MENU: [NavItem; 2] = [
    item("Overview", "/client/overview", NavIcon::Dashboard),
    item("Projects", "/client/projects", NavIcon::Projects),
];

static TEAM_MEMBER_MENU: [NavItem; 3] = [
    item("My Tasks", "/team-member/tasks", NavIcon::Tasks),
    item("Projects", "/projects", NavIcon::Projects),
    item("Calendar", "/team-member/calendar", NavIcon::Calendar),
];

static SUPER_ADMIN_MENU: [NavItem; 5] = [
    item("Dashboard", "/dashboard", NavIcon::Dashboard),
    item("Users", "/users", NavIcon::Users),
    item("Organizations", "/organizations", NavIcon::Organizations),
    item("Projects", "/projects", NavIcon::Projects),
    item("Settings", "/settings", NavIcon::Settings),
];

/// Fixed navigation menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationMenu {
    /// Platform administration menu.
    SuperAdmin,
    /// Client portal menu.
    Client,
    /// Team member workspace menu.
    TeamMember,
    /// Menu for organization admins and project managers.
    Default,
}

impl NavigationMenu {
    /// Every menu.
    pub const ALL: [Self; 4] = [Self::SuperAdmin, Self::Client, Self::TeamMember, Self::Default];

    /// Returns the menu entries in display order.
    #[must_use]
    pub fn items(self) -> &'static [NavItem] {
        match self {
            Self::SuperAdmin => &SUPER_ADMIN_MENU,
            Self::Client => &CLIENT_MENU,
            Self::TeamMember => &TEAM_MEMBER_MENU,
            Self::Default => &DEFAULT_MENU,
        }
    }
}

/// Ordered precedence table for menu selection. The first role held wins;
/// users holding none of them get [`NavigationMenu::Default`].
pub const NAVIGATION_PRECEDENCE: [(Role, NavigationMenu); 3] = [
    (Role::SuperAdmin, NavigationMenu::SuperAdmin),
    (Role::Client, NavigationMenu::Client),
    (Role::TeamMember, NavigationMenu::TeamMember),
];

/// Selects the menu for a role set using [`NAVIGATION_PRECEDENCE`].
#[must_use]
pub fn primary_navigation_menu(roles: &RoleSet) -> NavigationMenu {
    NAVIGATION_PRECEDENCE
        .iter()
        .find(|(role, _)| roles.contains(*role))
        .map_or(NavigationMenu::Default, |(_, menu)| *menu)
}

/// Returns the navigation entries for a role set.
#[must_use]
pub fn navigation_for(roles: &RoleSet) -> &'static [NavItem] {
    primary_navigation_menu(roles).items()
}
