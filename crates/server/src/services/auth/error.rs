//! Authentication error types.

use thiserror::Error;

use nepali_star_core::{EmailError, UsernameError};

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
///
/// `InvalidCredentials` covers unknown username, wrong password, and
/// deactivated account alike; `InvalidToken` covers malformed, forged, and
/// expired tokens alike. Callers get no oracle for which case occurred.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad username/password or inactive account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Malformed, forged, or expired token.
    #[error("invalid token")]
    InvalidToken,

    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token could not be signed.
    #[error("token signing failed")]
    TokenSigning,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
