//! Session token issuance and validation.
//!
//! Tokens are HS256 JWTs signed with the server secret. Validation is
//! stateless: the embedded claims are trusted for the token's lifetime
//! without a database round-trip, so a role change takes effect on a held
//! token only at re-authentication. Tokens are not refreshable; expiry
//! requires logging in again.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nepali_star_core::{AdminRole, AdminUserId, Capability, Username, permissions_for};

use super::error::AuthError;

/// Token lifetime: fixed 24 hours from issuance.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Pre-derived signing and verification keys for the server secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Derive both keys from the configured secret.
    #[must_use]
    pub fn from_secret(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin user ID.
    pub sub: AdminUserId,
    /// Login username at issuance time.
    pub username: Username,
    /// Role at issuance time.
    pub role: AdminRole,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Expiry (Unix seconds).
    pub exp: i64,
    /// Token ID.
    pub jti: String,
}

impl AdminClaims {
    /// Whether the role embedded in these claims grants a capability.
    ///
    /// Derived live from the static role table; the per-account snapshot in
    /// the database is not consulted here.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        permissions_for(self.role).contains(&capability)
    }
}

/// Issue a session token for an authenticated admin.
///
/// # Errors
///
/// Returns `AuthError::TokenSigning` if encoding fails.
pub fn issue(
    keys: &TokenKeys,
    id: AdminUserId,
    username: &Username,
    role: AdminRole,
) -> Result<String, AuthError> {
    issue_at(keys, id, username, role, Utc::now())
}

/// Issue a session token with an explicit issuance time.
///
/// # Errors
///
/// Returns `AuthError::TokenSigning` if encoding fails.
pub fn issue_at(
    keys: &TokenKeys,
    id: AdminUserId,
    username: &Username,
    role: AdminRole,
    issued_at: DateTime<Utc>,
) -> Result<String, AuthError> {
    let iat = issued_at.timestamp();
    let exp = iat + Duration::hours(TOKEN_TTL_HOURS).num_seconds();

    let claims = AdminClaims {
        sub: id,
        username: username.clone(),
        role,
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
    };

    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
        .map_err(|_| AuthError::TokenSigning)
}

/// Validate a session token and return its claims.
///
/// Fails uniformly with `AuthError::InvalidToken` for malformed, forged, and
/// expired tokens. No side effects; validating the same token twice yields
/// identical claims.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the token cannot be trusted.
pub fn validate(keys: &TokenKeys, token: &str) -> Result<AdminClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // A token is invalid at exactly `exp`; no grace window.
    validation.leeway = 0;
    validation.validate_exp = true;

    let data = jsonwebtoken::decode::<AdminClaims>(token, &keys.decoding, &validation)
        .map_err(|_| AuthError::InvalidToken)?;

    Ok(data.claims)
}
