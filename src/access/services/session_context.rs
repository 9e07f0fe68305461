//! Session lifecycle: hydrate, sign in, sign out and forced teardown.

use crate::access::{
    domain::{
        AccessDomainError, BearerToken, Credentials, RoleSet, RoutePath, Session, UserProfile,
        resolve_home_route,
    },
    ports::{
        AuthError, Authenticator, CURRENT_USER_KEY, SESSION_TOKEN_KEY, SessionStore,
        SessionStoreError, SessionTeardown,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend rejected the sign-in attempt.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The backend granted no role, so the user has no access.
    #[error("account has no roles and cannot access Flow")]
    NoAccess,
    /// The sign-in response was malformed.
    #[error(transparent)]
    Domain(#[from] AccessDomainError),
    /// Durable storage failed.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Outcome of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    /// The new session.
    pub session: Session,
    /// Where the user lands.
    pub home: RoutePath,
}

/// Persisted form of the user record stored under [`CURRENT_USER_KEY`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
    profile: UserProfile,
    authenticated_at: DateTime<Utc>,
}

/// Explicit session context injected into the services that need it.
///
/// The context starts signed out; call [`SessionContext::hydrate`] on start
/// to restore a persisted session.
pub struct SessionContext<S, A, C>
where
    S: SessionStore,
    A: Authenticator,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    authenticator: Arc<A>,
    clock: Arc<C>,
    current: RwLock<Option<Session>>,
}

impl<S, A, C> SessionContext<S, A, C>
where
    S: SessionStore,
    A: Authenticator,
    C: Clock + Send + Sync,
{
    /// Creates a signed-out context.
    #[must_use]
    pub const fn new(store: Arc<S>, authenticator: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            store,
            authenticator,
            clock,
            current: RwLock::new(None),
        }
    }

    /// Returns the active session, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the active session's roles, if any.
    #[must_use]
    pub fn roles(&self) -> Option<RoleSet> {
        self.current().map(|session| session.roles().clone())
    }

    /// Restores the persisted session.
    ///
    /// A partial or unreadable record is discarded and the context stays
    /// signed out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when storage cannot be read.
    pub fn hydrate(&self) -> SessionResult<Option<Session>> {
        let token = self.store.read(SESSION_TOKEN_KEY)?;
        let user = self.store.read(CURRENT_USER_KEY)?;
        let (raw_token, raw_user) = match (token, user) {
            (Some(raw_token), Some(raw_user)) => (raw_token, raw_user),
            (None, None) => return Ok(None),
            (token, user) => {
                warn!(
                    has_token = token.is_some(),
                    has_user = user.is_some(),
                    "discarding partial persisted session"
                );
                self.clear_store()?;
                return Ok(None);
            }
        };

        let restored = BearerToken::new(raw_token)
            .map_err(|err| err.to_string())
            .and_then(|bearer| {
                serde_json::from_str::<StoredUser>(&raw_user)
                    .map(|stored| Session::new(stored.profile, bearer, stored.authenticated_at))
                    .map_err(|err| err.to_string())
            });

        match restored {
            Ok(session) => {
                info!(user_id = %session.user_id(), "session restored");
                self.replace(Some(session.clone()));
                Ok(Some(session))
            }
            Err(reason) => {
                warn!(%reason, "discarding unreadable persisted session");
                self.clear_store()?;
                Ok(None)
            }
        }
    }

    /// Signs in and persists the resulting session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Auth`] when the backend rejects the
    /// credentials, [`SessionError::NoAccess`] when the account holds no
    /// role, and [`SessionError::Store`] when the session cannot be
    /// persisted. A rejected attempt leaves any existing session untouched.
    pub async fn sign_in(&self, credentials: &Credentials) -> SessionResult<SignedIn> {
        let response = self.authenticator.authenticate(credentials).await?;
        let roles = RoleSet::new(response.roles).map_err(|_| SessionError::NoAccess)?;
        let token = BearerToken::new(response.token)?;
        let profile = UserProfile::new(response.id, response.email, roles)?
            .with_username(response.username.clone())
            .with_name(response.username);
        let session = Session::new(profile, token, self.clock.utc());

        let stored = StoredUser {
            profile: session.user().clone(),
            authenticated_at: session.authenticated_at(),
        };
        let user_json = serde_json::to_string(&stored)
            .map_err(|err| SessionError::Store(SessionStoreError::storage(err)))?;
        self.store.write(SESSION_TOKEN_KEY, session.token().as_str())?;
        self.store.write(CURRENT_USER_KEY, &user_json)?;

        let home = resolve_home_route(session.roles());
        info!(user_id = %session.user_id(), roles = %session.roles(), home = %home, "signed in");
        self.replace(Some(session.clone()));
        Ok(SignedIn { session, home })
    }

    /// Signs out, clearing memory and durable storage.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when storage cannot be cleared. The
    /// in-memory session is dropped either way.
    pub fn sign_out(&self) -> SessionResult<RoutePath> {
        if let Some(session) = self.replace(None) {
            info!(user_id = %session.user_id(), "signed out");
        }
        self.clear_store()?;
        Ok(RoutePath::LOGIN)
    }

    fn replace(&self, next: Option<Session>) -> Option<Session> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    fn clear_store(&self) -> SessionResult<()> {
        self.store.remove(SESSION_TOKEN_KEY)?;
        self.store.remove(CURRENT_USER_KEY)?;
        Ok(())
    }
}

impl<S, A, C> SessionTeardown for SessionContext<S, A, C>
where
    S: SessionStore,
    A: Authenticator,
    C: Clock + Send + Sync,
{
    fn force_sign_out(&self) -> RoutePath {
        if let Some(session) = self.replace(None) {
            warn!(user_id = %session.user_id(), "backend rejected session, signing out");
        }
        if let Err(err) = self.clear_store() {
            warn!(error = %err, "failed to clear persisted session");
        }
        RoutePath::LOGIN
    }
}
