//! Admin authentication service.
//!
//! Verifies credentials against stored Argon2 hashes, issues and validates
//! session tokens, and manages admin accounts. Lookups during login consider
//! active accounts only; unknown usernames, wrong passwords, and deactivated
//! accounts all fail with the same error so callers cannot enumerate accounts.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{AdminClaims, TokenKeys};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use nepali_star_core::{AdminRole, AdminUserId, Email, Username, permissions_for};

use crate::db::admin_users::AdminUserRepository;
use crate::models::admin_user::{AdminUser, NewAdminUser};

/// Minimum password length for new accounts.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Admin authentication service.
pub struct AuthService<'a> {
    admins: AdminUserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Authenticate a username/password pair and issue a session token.
    ///
    /// On success the account's `last_login_at` is updated best-effort: a
    /// failed write is logged and does not block token issuance.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for unknown usernames, wrong
    /// passwords, and deactivated accounts alike.
    pub async fn authenticate(
        &self,
        keys: &TokenKeys,
        username: &str,
        password: &str,
    ) -> Result<(AdminUser, String), AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        // A username that can't parse can't exist; fail the same way.
        let username =
            Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, credential_hash) = self
            .admins
            .get_for_login(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &credential_hash)?;

        if let Err(e) = self.admins.update_last_login(user.id).await {
            tracing::warn!("failed to record login time for admin {}: {e}", user.id);
        }

        let token = token::issue(keys, user.id, &user.username, user.role)?;

        Ok((user, token))
    }

    // =========================================================================
    // Account Management
    // =========================================================================

    /// Create a new admin account.
    ///
    /// The capability snapshot is derived from the role; client-supplied
    /// grants are not accepted anywhere in the API.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername`/`InvalidEmail`/`WeakPassword` on
    /// validation failure, and `AuthError::Repository` with a `Conflict` for
    /// duplicate usernames or emails.
    pub async fn create_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: AdminRole,
        created_by: Option<AdminUserId>,
    ) -> Result<AdminUser, AuthError> {
        let username = Username::parse(username)?;
        let email = Email::parse(email)?;
        validate_password(password)?;

        let credential_hash = hash_password(password)?;

        let new_user = NewAdminUser {
            username,
            email,
            credential_hash,
            role,
            permissions: permissions_for(role).to_vec(),
            created_by,
        };

        let user = self.admins.create(&new_user).await?;
        Ok(user)
    }

    /// Update an admin account's profile, role, and active flag.
    ///
    /// The capability snapshot is re-derived from the (possibly new) role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` with `NotFound` if the account doesn't
    /// exist, or `Conflict` if the username or email is taken.
    pub async fn update_admin(
        &self,
        id: AdminUserId,
        username: &str,
        email: &str,
        role: AdminRole,
        is_active: bool,
    ) -> Result<AdminUser, AuthError> {
        let username = Username::parse(username)?;
        let email = Email::parse(email)?;

        let user = self
            .admins
            .update(
                id,
                &username,
                &email,
                role,
                permissions_for(role),
                is_active,
            )
            .await?;

        Ok(user)
    }

    /// List all admin accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn list_admins(&self) -> Result<Vec<AdminUser>, AuthError> {
        let users = self.admins.list_all().await?;
        Ok(users)
    }

    /// Get an admin account by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn get_admin(&self, id: AdminUserId) -> Result<Option<AdminUser>, AuthError> {
        let user = self.admins.get_by_id(id).await?;
        Ok(user)
    }

    /// Delete an admin account.
    ///
    /// Self-deletion must be rejected by the caller before reaching this
    /// point; this method performs no identity checks.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` with `NotFound` if the account doesn't exist.
    pub async fn delete_admin(&self, id: AdminUserId) -> Result<(), AuthError> {
        self.admins.delete(id).await?;
        Ok(())
    }
}

// =============================================================================
// Password Helpers
// =============================================================================

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_phc_format() {
        let hash = hash_password("sita123").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        // Hash should be different each time (different salt)
        let hash2 = hash_password("sita123").unwrap();
        assert_ne!(hash, hash2);
    }

    #[test]
    fn test_verify_correct_password() {
        let hash = hash_password("correct_password").unwrap();
        assert!(verify_password("correct_password", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password_fails_uniformly() {
        let hash = hash_password("correct_password").unwrap();
        assert!(matches!(
            verify_password("wrong_password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_invalid_hash_fails_uniformly() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-hash"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_unicode_password_roundtrip() {
        let password = "पासवर्ड🔐";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).is_ok());
    }
}
