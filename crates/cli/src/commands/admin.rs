//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create the first super admin (no created_by; later accounts are
//! # created through the API by a super admin)
//! ns-cli admin create -u dipesh -e super@nepalistar.com -p 'Str0ngPass' -r super_admin
//!
//! # Deactivate an account
//! ns-cli admin deactivate -u dipesh
//! ```
//!
//! # Environment Variables
//!
//! - `API_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use sqlx::PgPool;
use thiserror::Error;

use nepali_star_core::{AdminRole, Capability, Email, Username, permissions_for};
use nepali_star_server::services::auth::hash_password;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: super_admin, admin, editor")]
    InvalidRole(String),

    /// Invalid username.
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Password too short.
    #[error("Password must be at least 6 characters")]
    WeakPassword,

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,

    /// User already exists.
    #[error("Admin user already exists with username or email: {0}")]
    UserExists(String),

    /// User not found.
    #[error("No admin user with username: {0}")]
    UserNotFound(String),
}

async fn connect() -> Result<PgPool, AdminError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("API_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| AdminError::MissingEnvVar("API_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(PgPool::connect(&database_url).await?)
}

/// Create a new admin user.
///
/// The capability snapshot is derived from the role, exactly as the API does
/// for accounts created by a super admin.
///
/// # Errors
///
/// Returns `AdminError` on validation failure, duplicate account, or
/// database error.
pub async fn create_user(
    username: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<i32, AdminError> {
    let role: AdminRole = role
        .parse()
        .map_err(|_| AdminError::InvalidRole(role.to_owned()))?;

    let username =
        Username::parse(username).map_err(|e| AdminError::InvalidUsername(e.to_string()))?;
    let email = Email::parse(email).map_err(|e| AdminError::InvalidEmail(e.to_string()))?;

    if password.len() < 6 {
        return Err(AdminError::WeakPassword);
    }

    let credential_hash = hash_password(password).map_err(|_| AdminError::PasswordHash)?;
    let permissions: Vec<String> = permissions_for(role)
        .iter()
        .map(|c: &Capability| c.id().to_owned())
        .collect();

    let pool = connect().await?;

    tracing::info!("Creating admin user: {} ({})", username, role);

    // Check if user already exists
    let existing: Option<i32> =
        sqlx::query_scalar("SELECT id FROM admin_users WHERE username = $1 OR email = $2")
            .bind(username.as_str())
            .bind(email.as_str())
            .fetch_optional(&pool)
            .await?;

    if existing.is_some() {
        return Err(AdminError::UserExists(username.into_inner()));
    }

    // Create the user
    let user_id: i32 = sqlx::query_scalar(
        r"
        INSERT INTO admin_users (username, email, credential_hash, role, permissions)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        ",
    )
    .bind(username.as_str())
    .bind(email.as_str())
    .bind(&credential_hash)
    .bind(role)
    .bind(&permissions)
    .fetch_one(&pool)
    .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Username: {}, Role: {}",
        user_id,
        username,
        role
    );

    Ok(user_id)
}

/// Deactivate an admin account by username.
///
/// Deactivated accounts fail authentication with the same error as wrong
/// credentials; tokens already issued remain valid until they expire.
///
/// # Errors
///
/// Returns `AdminError::UserNotFound` if no such account exists.
pub async fn deactivate_user(username: &str) -> Result<(), AdminError> {
    let username =
        Username::parse(username).map_err(|e| AdminError::InvalidUsername(e.to_string()))?;

    let pool = connect().await?;

    let result = sqlx::query("UPDATE admin_users SET is_active = FALSE WHERE username = $1")
        .bind(username.as_str())
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AdminError::UserNotFound(username.into_inner()));
    }

    tracing::info!("Admin user {} deactivated", username);
    Ok(())
}
