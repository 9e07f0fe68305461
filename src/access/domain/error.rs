//! Error types for access domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing access domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessDomainError {
    /// A role set must hold at least one role.
    #[error("role set must not be empty")]
    EmptyRoleSet,

    /// A bearer token must not be blank.
    #[error("bearer token must not be empty")]
    EmptyToken,

    /// Route paths are absolute.
    #[error("invalid route path '{0}', expected a leading '/'")]
    InvalidRoutePath(String),

    /// A user needs an email address.
    #[error("user email must not be empty")]
    EmptyEmail,
}

/// Error returned while parsing roles from the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
