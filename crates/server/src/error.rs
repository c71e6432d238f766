//! Unified error handling for the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the API.
///
/// Authentication failures (401) and authorization failures (403) are
/// distinct variants and are never conflated, so clients can tell
/// "log in" apart from "you lack rights".
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated (missing/invalid credentials or token).
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Caller is authenticated but lacks the required capability.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Uniqueness conflict (e.g., duplicate username or email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("not found".to_owned()),
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Database(other),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            // Uniform terse messages; never reveal which check failed.
            AuthError::InvalidCredentials => Self::Unauthenticated("invalid credentials".to_owned()),
            AuthError::InvalidToken => Self::Unauthenticated("invalid token".to_owned()),
            AuthError::InvalidUsername(e) => Self::BadRequest(e.to_string()),
            AuthError::InvalidEmail(e) => Self::BadRequest(e.to_string()),
            AuthError::WeakPassword(msg) => Self::BadRequest(msg),
            AuthError::PasswordHash => Self::Internal("password hashing error".to_owned()),
            AuthError::TokenSigning => Self::Internal("token signing failed".to_owned()),
            AuthError::Repository(e) => e.into(),
        }
    }
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Database(_) | Self::Internal(_) => "internal server error".to_owned(),
            Self::NotFound(msg)
            | Self::Unauthenticated(msg)
            | Self::Forbidden(msg)
            | Self::Conflict(msg)
            | Self::BadRequest(msg) => msg,
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
