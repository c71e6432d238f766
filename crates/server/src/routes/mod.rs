//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness check
//! GET    /health/ready              - Readiness check (verifies database)
//!
//! # Auth
//! POST   /api/auth/login            - Issue a session token
//! GET    /api/auth/verify           - Validate token, return fresh admin record
//! POST   /api/auth/logout           - Acknowledge logout (tokens are stateless)
//!
//! # Admin users (manage_admins capability)
//! GET    /api/admins                - List admin users
//! POST   /api/admins                - Create admin user
//! PUT    /api/admins/{id}           - Update admin user
//! DELETE /api/admins/{id}           - Delete admin user (never your own)
//!
//! # Posts (public reads, capability-gated writes)
//! GET    /api/posts                 - List posts (status/category filters)
//! GET    /api/posts/{id}            - Get a post
//! POST   /api/posts                 - Create post (create_posts)
//! PUT    /api/posts/{id}            - Update post (edit_posts)
//! DELETE /api/posts/{id}            - Delete post (delete_posts)
//!
//! # Stories (public reads, capability-gated writes)
//! GET    /api/stories               - List stories (active filter)
//! POST   /api/stories               - Create story (create_posts)
//! PUT    /api/stories/{id}          - Update story (edit_posts)
//! PATCH  /api/stories/{id}/toggle   - Toggle active flag (edit_posts)
//! DELETE /api/stories/{id}          - Delete story (delete_posts)
//! ```

pub mod admin_users;
pub mod auth;
pub mod posts;
pub mod stories;

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use serde::Serialize;

use crate::state::AppState;

/// Simple message response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/auth/logout", post(auth::logout))
        // Admin users
        .route(
            "/api/admins",
            get(admin_users::list).post(admin_users::create),
        )
        .route(
            "/api/admins/{id}",
            put(admin_users::update).delete(admin_users::remove),
        )
        // Posts
        .route("/api/posts", get(posts::list).post(posts::create))
        .route(
            "/api/posts/{id}",
            get(posts::show).put(posts::update).delete(posts::remove),
        )
        // Stories
        .route("/api/stories", get(stories::list).post(stories::create))
        .route(
            "/api/stories/{id}",
            put(stories::update).delete(stories::remove),
        )
        .route("/api/stories/{id}/toggle", patch(stories::toggle))
}
