//! Authentication port.

use crate::access::domain::{Credentials, Role, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for authentication.
pub type AuthResult<T> = Result<T, AuthError>;

/// Successful sign-in response from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Issued bearer token.
    pub token: String,
    /// User identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Roles granted to the user; may be empty.
    pub roles: Vec<Role>,
}

/// Exchanges credentials for a bearer token and role list.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticates `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the backend rejects the
    /// credentials and [`AuthError::Transport`] when it cannot be reached.
    async fn authenticate(&self, credentials: &Credentials) -> AuthResult<AuthenticatedUser>;
}

/// Errors returned by authenticators.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The backend rejected the credentials.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The backend could not be reached.
    #[error("authentication transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
