//! Admin user management route handlers.
//!
//! All routes require the `manage_admins` capability. Two checks run before
//! any mutation: non-super-admins can never assign the `super_admin` role,
//! and no admin can delete their own account.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use nepali_star_core::{AdminRole, AdminUserId, Capability};

use crate::error::AppError;
use crate::middleware::{RequireAuth, forbid_escalation, forbid_self_target, require_capability};
use crate::models::AdminUser;
use crate::services::AuthService;
use crate::state::AppState;

use super::MessageResponse;

/// Request body for creating an admin user.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: AdminRole,
}

/// Request body for updating an admin user.
#[derive(Debug, Deserialize)]
pub struct UpdateAdminRequest {
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    pub is_active: bool,
}

/// List all admin users.
///
/// GET /api/admins
///
/// # Errors
///
/// Returns 401 without a valid token, 403 without `manage_admins`.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
) -> Result<Json<Vec<AdminUser>>, AppError> {
    require_capability(&claims, Capability::ManageAdmins)?;

    let admins = AuthService::new(state.pool()).list_admins().await?;
    Ok(Json(admins))
}

/// Create a new admin user.
///
/// POST /api/admins
///
/// The capability snapshot is derived from the role server-side.
///
/// # Errors
///
/// Returns 403 without `manage_admins` or on a role-escalation attempt,
/// 409 on duplicate username/email.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Json(req): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AdminUser>), AppError> {
    require_capability(&claims, Capability::ManageAdmins)?;
    forbid_escalation(&claims, req.role)?;

    let admin = AuthService::new(state.pool())
        .create_admin(
            &req.username,
            &req.email,
            &req.password,
            req.role,
            Some(claims.sub),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(admin)))
}

/// Update an admin user.
///
/// PUT /api/admins/{id}
///
/// # Errors
///
/// Returns 403 without `manage_admins` or on a role-escalation attempt,
/// 404 for an unknown id, 409 on duplicate username/email.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Path(id): Path<i32>,
    Json(req): Json<UpdateAdminRequest>,
) -> Result<Json<AdminUser>, AppError> {
    require_capability(&claims, Capability::ManageAdmins)?;
    forbid_escalation(&claims, req.role)?;

    let admin = AuthService::new(state.pool())
        .update_admin(
            AdminUserId::new(id),
            &req.username,
            &req.email,
            req.role,
            req.is_active,
        )
        .await?;

    Ok(Json(admin))
}

/// Delete an admin user.
///
/// DELETE /api/admins/{id}
///
/// # Errors
///
/// Returns 403 without `manage_admins` or when targeting your own account,
/// 404 for an unknown id.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    require_capability(&claims, Capability::ManageAdmins)?;
    forbid_self_target(&claims, AdminUserId::new(id))?;

    AuthService::new(state.pool())
        .delete_admin(AdminUserId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("admin user deleted successfully")))
}
