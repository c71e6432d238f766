//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::auth::token::TokenKeys;

/// Application state shared across all handlers.
///
/// Cheap to clone; the inner data is behind an `Arc`. Everything here is
/// read-only after startup: the configuration, the connection pool handle,
/// and the token signing keys.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    token_keys: TokenKeys,
}

impl AppState {
    /// Build the application state from configuration and a connection pool.
    ///
    /// Derives the token signing keys from the configured JWT secret.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let token_keys = TokenKeys::from_secret(&config.jwt_secret);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                token_keys,
            }),
        }
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Returns the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Returns the token signing/verification keys.
    #[must_use]
    pub fn token_keys(&self) -> &TokenKeys {
        &self.inner.token_keys
    }
}
