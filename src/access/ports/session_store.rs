//! Durable key-value storage for the signed-in session.

use std::sync::Arc;
use thiserror::Error;

/// Storage key holding the raw bearer token.
pub const SESSION_TOKEN_KEY: &str = "jwtToken";

/// Storage key holding the serialized user profile.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Durable storage surviving reloads, addressed by fixed keys.
pub trait SessionStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Storage`] when the backing storage fails.
    fn read(&self, key: &str) -> SessionStoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Storage`] when the backing storage fails.
    fn write(&self, key: &str, value: &str) -> SessionStoreResult<()>;

    /// Removes the value under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Storage`] when the backing storage fails.
    fn remove(&self, key: &str) -> SessionStoreResult<()>;
}

/// Errors returned by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// Storage-layer failure.
    #[error("session storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
