//! Application services for access control.

mod access_control;
mod session_context;

pub use access_control::AccessControl;
pub use session_context::{SessionContext, SessionError, SessionResult, SignedIn};
