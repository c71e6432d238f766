//! Authentication middleware and the authorization gate.
//!
//! [`RequireAuth`] extracts and validates the bearer token; the gate
//! functions below are the only place authorization decisions are made.
//! Route handlers call them before touching storage, so a capability check
//! can never drift from the static role table.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};

use nepali_star_core::{AdminRole, AdminUserId, Capability};

use crate::error::AppError;
use crate::services::auth::{AdminClaims, token};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Token validation is stateless; no database round-trip happens here.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(claims): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.username)
/// }
/// ```
pub struct RequireAuth(pub AdminClaims);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthenticated("missing bearer token".to_owned()))?;

        // Malformed, forged, and expired tokens are indistinguishable here.
        let claims = token::validate(state.token_keys(), token)
            .map_err(|_| AppError::Unauthenticated("invalid token".to_owned()))?;

        Ok(Self(claims))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Require that the caller's role grants a capability.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the capability is not granted.
pub fn require_capability(claims: &AdminClaims, capability: Capability) -> Result<(), AppError> {
    if claims.has_capability(capability) {
        Ok(())
    } else {
        Err(AppError::Forbidden("insufficient permissions".to_owned()))
    }
}

/// Reject role escalation: only super admins may assign `super_admin`.
///
/// # Errors
///
/// Returns `AppError::Forbidden` on an escalation attempt.
pub fn forbid_escalation(claims: &AdminClaims, target_role: AdminRole) -> Result<(), AppError> {
    if target_role == AdminRole::SuperAdmin && claims.role != AdminRole::SuperAdmin {
        return Err(AppError::Forbidden(
            "only super admins can assign the super_admin role".to_owned(),
        ));
    }
    Ok(())
}

/// Reject operations an admin attempts against their own account.
///
/// Applies regardless of role; a super admin cannot delete themselves.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the target is the caller.
pub fn forbid_self_target(claims: &AdminClaims, target: AdminUserId) -> Result<(), AppError> {
    if claims.sub == target {
        return Err(AppError::Forbidden(
            "cannot delete your own account".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nepali_star_core::Username;

    fn claims(id: i32, role: AdminRole) -> AdminClaims {
        AdminClaims {
            sub: AdminUserId::new(id),
            username: Username::parse("tester").unwrap(),
            role,
            iat: 0,
            exp: 0,
            jti: String::new(),
        }
    }

    #[test]
    fn test_require_capability_granted() {
        let c = claims(1, AdminRole::SuperAdmin);
        assert!(require_capability(&c, Capability::ManageAdmins).is_ok());
    }

    #[test]
    fn test_require_capability_denied_is_forbidden() {
        let c = claims(1, AdminRole::Admin);
        assert!(matches!(
            require_capability(&c, Capability::ManageAdmins),
            Err(AppError::Forbidden(_))
        ));

        let c = claims(1, AdminRole::Editor);
        assert!(matches!(
            require_capability(&c, Capability::DeletePosts),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_forbid_escalation() {
        let admin = claims(1, AdminRole::Admin);
        assert!(matches!(
            forbid_escalation(&admin, AdminRole::SuperAdmin),
            Err(AppError::Forbidden(_))
        ));
        assert!(forbid_escalation(&admin, AdminRole::Editor).is_ok());

        let super_admin = claims(1, AdminRole::SuperAdmin);
        assert!(forbid_escalation(&super_admin, AdminRole::SuperAdmin).is_ok());
    }

    #[test]
    fn test_forbid_self_target_regardless_of_role() {
        let c = claims(42, AdminRole::SuperAdmin);
        assert!(matches!(
            forbid_self_target(&c, AdminUserId::new(42)),
            Err(AppError::Forbidden(_))
        ));
        assert!(forbid_self_target(&c, AdminUserId::new(7)).is_ok());
    }
}
