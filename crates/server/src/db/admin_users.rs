//! Admin user repository for database operations.
//!
//! Credential hashes are read here for verification and never cross into
//! the domain [`AdminUser`] type.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use nepali_star_core::{AdminRole, AdminUserId, Capability, Email, Username};

use super::RepositoryError;
use crate::models::admin_user::{AdminUser, NewAdminUser};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` admin user queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: i32,
    username: String,
    email: String,
    role: AdminRole,
    permissions: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    created_by: Option<i32>,
}

impl TryFrom<AdminUserRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let permissions = row
            .permissions
            .iter()
            .map(|s| s.parse::<Capability>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid capability in database: {e}"))
            })?;

        Ok(Self {
            id: AdminUserId::new(row.id),
            username,
            email,
            role: row.role,
            permissions,
            is_active: row.is_active,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
            created_by: row.created_by.map(AdminUserId::new),
        })
    }
}

/// Internal row type for login queries (includes the credential hash).
#[derive(Debug, sqlx::FromRow)]
struct AdminUserAuthRow {
    id: i32,
    username: String,
    email: String,
    role: AdminRole,
    permissions: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    created_by: Option<i32>,
    credential_hash: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin user database operations.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all admin users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminUserRow>(
            r"
            SELECT id, username, email, role, permissions, is_active,
                   created_at, last_login_at, created_by
            FROM admin_users
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an admin user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: AdminUserId) -> Result<Option<AdminUser>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            SELECT id, username, email, role, permissions, is_active,
                   created_at, last_login_at, created_by
            FROM admin_users
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an **active** admin user and their credential hash by username.
    ///
    /// Inactive accounts are treated as not found so that authentication
    /// fails uniformly for them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_for_login(
        &self,
        username: &Username,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserAuthRow>(
            r"
            SELECT id, username, email, role, permissions, is_active,
                   created_at, last_login_at, created_by, credential_hash
            FROM admin_users
            WHERE username = $1 AND is_active = TRUE
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let credential_hash = r.credential_hash;
        let user: AdminUser = AdminUserRow {
            id: r.id,
            username: r.username,
            email: r.email,
            role: r.role,
            permissions: r.permissions,
            is_active: r.is_active,
            created_at: r.created_at,
            last_login_at: r.last_login_at,
            created_by: r.created_by,
        }
        .try_into()?;

        Ok(Some((user, credential_hash)))
    }

    /// Create a new admin user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new_user: &NewAdminUser) -> Result<AdminUser, RepositoryError> {
        let permissions: Vec<String> = new_user
            .permissions
            .iter()
            .map(|c| c.id().to_owned())
            .collect();

        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            INSERT INTO admin_users (username, email, credential_hash, role, permissions, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, role, permissions, is_active,
                      created_at, last_login_at, created_by
            ",
        )
        .bind(new_user.username.as_str())
        .bind(new_user.email.as_str())
        .bind(&new_user.credential_hash)
        .bind(new_user.role)
        .bind(&permissions)
        .bind(new_user.created_by.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username or email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Replace an admin user's profile, role, capability snapshot, and active flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the username or email is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: AdminUserId,
        username: &Username,
        email: &Email,
        role: AdminRole,
        permissions: &[Capability],
        is_active: bool,
    ) -> Result<AdminUser, RepositoryError> {
        let permissions: Vec<String> = permissions.iter().map(|c| c.id().to_owned()).collect();

        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            UPDATE admin_users SET
                username = $1, email = $2, role = $3, permissions = $4, is_active = $5
            WHERE id = $6
            RETURNING id, username, email, role, permissions, is_active,
                      created_at, last_login_at, created_by
            ",
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(role)
        .bind(&permissions)
        .bind(is_active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username or email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Record a successful authentication.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_last_login(&self, id: AdminUserId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE admin_users SET last_login_at = NOW() WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Delete an admin user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AdminUserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admin_users WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
