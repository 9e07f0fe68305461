//! Shared world state for route guard BDD scenarios.

use flowboard::access::{
    domain::{RouteDecision, Session},
    services::AccessControl,
};
use rstest::fixture;

/// Scenario world for route guard behaviour tests.
pub struct RouteGuardWorld {
    pub access: AccessControl,
    pub session: Option<Session>,
    pub decision: Option<RouteDecision>,
}

impl RouteGuardWorld {
    /// Creates a signed-out world over the application route table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            access: AccessControl::default(),
            session: None,
            decision: None,
        }
    }
}

impl Default for RouteGuardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RouteGuardWorld {
    RouteGuardWorld::default()
}
