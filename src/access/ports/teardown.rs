//! Forced session teardown.

use crate::access::domain::RoutePath;

/// Drops the active session when the backend reports it as unauthorized.
///
/// Implementations clear both the in-memory and the durable session and
/// return the route the caller must be sent to.
pub trait SessionTeardown: Send + Sync {
    /// Tears the session down and returns the login entry point.
    fn force_sign_out(&self) -> RoutePath;
}
