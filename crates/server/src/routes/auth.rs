//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::AdminUser;
use crate::services::AuthService;
use crate::state::AppState;

use super::MessageResponse;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed session token, valid for 24 hours.
    pub token: String,
    pub admin: AdminUser,
}

/// Response for token verification.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub admin: AdminUser,
}

/// Authenticate and issue a session token.
///
/// POST /api/auth/login
///
/// # Errors
///
/// Returns 400 if username or password is missing, 401 on any credential
/// failure (the response never reveals which check failed).
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "username and password are required".to_owned(),
        ));
    }

    let auth = AuthService::new(state.pool());
    let (admin, token) = auth
        .authenticate(state.token_keys(), &req.username, &req.password)
        .await?;

    Ok(Json(LoginResponse { token, admin }))
}

/// Validate the bearer token and return the current admin record.
///
/// GET /api/auth/verify
///
/// Token validation itself is stateless; this endpoint additionally fetches
/// the fresh record so the front end sees up-to-date role and permissions.
///
/// # Errors
///
/// Returns 401 if the token is invalid or the account no longer exists.
pub async fn verify(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
) -> Result<Json<VerifyResponse>, AppError> {
    let admin = AuthService::new(state.pool())
        .get_admin(claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("admin not found".to_owned()))?;

    Ok(Json(VerifyResponse { admin }))
}

/// Acknowledge logout.
///
/// POST /api/auth/logout
///
/// Tokens are stateless and cannot be revoked server-side; the client
/// discards its copy.
pub async fn logout(RequireAuth(_claims): RequireAuth) -> Json<MessageResponse> {
    Json(MessageResponse::new("logged out successfully"))
}
