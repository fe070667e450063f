//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during employee registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration attempted with the wrong shared secret.
    #[error("invalid registration secret")]
    InvalidRegistrationSecret,

    /// Required field absent or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Role code other than 0 or 1.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// Username already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// Unknown username or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Whether this error is the server's fault rather than the caller's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Repository(_) | Self::PasswordHash)
    }
}
