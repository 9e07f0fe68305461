//! In-memory implementations of the access ports.

use crate::access::{
    domain::Credentials,
    ports::{
        AuthError, AuthResult, AuthenticatedUser, Authenticator, SessionStore, SessionStoreError,
        SessionStoreResult,
    },
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory session storage.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_ok_and(|entries| entries.is_empty())
    }
}

fn poisoned(err: impl ToString) -> SessionStoreError {
    SessionStoreError::storage(std::io::Error::other(err.to_string()))
}

impl SessionStore for InMemorySessionStore {
    fn read(&self, key: &str) -> SessionStoreResult<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> SessionStoreResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionStoreResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Authenticator backed by a fixed account list.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator {
    accounts: Vec<StaticAccount>,
}

#[derive(Debug, Clone)]
struct StaticAccount {
    password: String,
    user: AuthenticatedUser,
}

impl StaticAuthenticator {
    /// Creates an authenticator with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account that signs in by username or email.
    #[must_use]
    pub fn with_account(mut self, password: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.accounts.push(StaticAccount {
            password: password.into(),
            user,
        });
        self
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> AuthResult<AuthenticatedUser> {
        let login = credentials.username_or_email.trim();
        self.accounts
            .iter()
            .find(|account| {
                (account.user.username == login || account.user.email == login)
                    && account.password == credentials.password
            })
            .map(|account| account.user.clone())
            .ok_or_else(|| AuthError::InvalidCredentials("Invalid credentials".to_owned()))
    }
}
