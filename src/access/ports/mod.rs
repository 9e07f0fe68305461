//! Port contracts for access control.
//!
//! Ports define infrastructure-agnostic interfaces used by access services.

pub mod authenticator;
pub mod session_store;
pub mod teardown;

pub use authenticator::{AuthError, AuthResult, AuthenticatedUser, Authenticator};
pub use session_store::{
    CURRENT_USER_KEY, SESSION_TOKEN_KEY, SessionStore, SessionStoreError, SessionStoreResult,
};
pub use teardown::SessionTeardown;
