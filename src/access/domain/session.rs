//! Authenticated session values.

use super::{AccessDomainError, RoleSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a backend user identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque bearer credential issued at sign-in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Creates a validated token.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDomainError::EmptyToken`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, AccessDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccessDomainError::EmptyToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Sign-in credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username or email address.
    pub username_or_email: String,
    /// Plain-text password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username_or_email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username_or_email: username_or_email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username_or_email", &self.username_or_email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity and roles of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    id: UserId,
    username: Option<String>,
    email: String,
    name: Option<String>,
    roles: RoleSet,
}

impl UserProfile {
    /// Creates a profile.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDomainError::EmptyEmail`] when the email is blank.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        roles: RoleSet,
    ) -> Result<Self, AccessDomainError> {
        let email_value = email.into();
        if email_value.trim().is_empty() {
            return Err(AccessDomainError::EmptyEmail);
        }
        Ok(Self {
            id,
            username: None,
            email: email_value,
            name: None,
            roles,
        })
    }

    /// Sets the login name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name, if known.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name, falling back to the username and then the
    /// email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.email)
    }

    /// Returns the user's roles.
    #[must_use]
    pub const fn roles(&self) -> &RoleSet {
        &self.roles
    }
}

/// Authenticated session: a user profile plus its bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user: UserProfile,
    token: BearerToken,
    authenticated_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub const fn new(user: UserProfile, token: BearerToken, authenticated_at: DateTime<Utc>) -> Self {
        Self {
            user,
            token,
            authenticated_at,
        }
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Returns the signed-in user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user.id
    }

    /// Returns the signed-in user's roles.
    #[must_use]
    pub const fn roles(&self) -> &RoleSet {
        &self.user.roles
    }

    /// Returns the bearer credential.
    #[must_use]
    pub const fn token(&self) -> &BearerToken {
        &self.token
    }

    /// Returns when the session was established.
    #[must_use]
    pub const fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }

    /// Returns the `Authorization` header value for backend requests.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token.as_str())
    }
}
