//! Authentication and authorization behavior of the API router.
//!
//! These tests drive the router directly with `tower::ServiceExt::oneshot`
//! and only exercise paths that are decided before any database access:
//! missing/invalid/expired tokens, capability denials, role escalation, and
//! self-deletion. The pool is created lazily and never connects.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use nepali_star_core::{AdminRole, AdminUserId, Username};
use nepali_star_server::config::ApiConfig;
use nepali_star_server::routes;
use nepali_star_server::services::auth::token::{self, TokenKeys};
use nepali_star_server::state::AppState;

const TEST_JWT_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%";
const TEST_DATABASE_URL: &str = "postgres://127.0.0.1:5432/nepali_star_test";

fn test_state() -> AppState {
    let config = ApiConfig {
        database_url: SecretString::from(TEST_DATABASE_URL),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        jwt_secret: SecretString::from(TEST_JWT_SECRET),
        cors_origin: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    };

    // Lazy pool: parses the URL but never connects. None of these tests
    // reach a handler path that touches the database.
    let pool = PgPoolOptions::new().connect_lazy(TEST_DATABASE_URL).unwrap();

    AppState::new(config, pool)
}

fn app() -> Router {
    routes::routes().with_state(test_state())
}

fn test_keys() -> TokenKeys {
    TokenKeys::from_secret(&SecretString::from(TEST_JWT_SECRET))
}

fn bearer(role: AdminRole, id: i32) -> String {
    let username = Username::parse("tester").unwrap();
    let token = token::issue(&test_keys(), AdminUserId::new(id), &username, role).unwrap();
    format!("Bearer {token}")
}

fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn delete(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

// ============================================================================
// Authentication (401)
// ============================================================================

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let response = app().oneshot(get("/api/admins", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let response = app()
        .oneshot(get("/api/admins", Some("Bearer not-a-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let response = app()
        .oneshot(get("/api/admins", Some("Basic dXNlcjpwYXNz")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let username = Username::parse("tester").unwrap();
    let issued = Utc::now() - Duration::hours(25);
    let token = token::issue_at(
        &test_keys(),
        AdminUserId::new(1),
        &username,
        AdminRole::SuperAdmin,
        issued,
    )
    .unwrap();

    let response = app()
        .oneshot(get("/api/admins", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_key_is_unauthorized() {
    let other = TokenKeys::from_secret(&SecretString::from("zX8#wV5@tR2!qN9$mK6^jH3&gF0*dS7("));
    let username = Username::parse("tester").unwrap();
    let token = token::issue(&other, AdminUserId::new(1), &username, AdminRole::SuperAdmin).unwrap();

    let response = app()
        .oneshot(get("/api/admins", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mutating_post_route_requires_token() {
    let body = serde_json::json!({
        "title": "t", "excerpt": "e", "category": "c", "author": "a"
    });
    let response = app()
        .oneshot(json_request("POST", "/api/posts", None, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Authorization (403, never conflated with 401)
// ============================================================================

#[tokio::test]
async fn editor_cannot_list_admins() {
    let auth = bearer(AdminRole::Editor, 3);
    let response = app().oneshot(get("/api/admins", Some(&auth))).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_cannot_create_admin_users() {
    let auth = bearer(AdminRole::Admin, 2);
    let body = serde_json::json!({
        "username": "newbie",
        "email": "newbie@nepalistar.com",
        "password": "sekret99",
        "role": "editor"
    });

    let response = app()
        .oneshot(json_request("POST", "/api/admins", Some(&auth), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_cannot_create_super_admin() {
    let auth = bearer(AdminRole::Admin, 2);
    let body = serde_json::json!({
        "username": "boss2",
        "email": "boss2@nepalistar.com",
        "password": "sekret99",
        "role": "super_admin"
    });

    let response = app()
        .oneshot(json_request("POST", "/api/admins", Some(&auth), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn super_admin_cannot_delete_own_account() {
    let auth = bearer(AdminRole::SuperAdmin, 1);
    let response = app().oneshot(delete("/api/admins/1", &auth)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["error"], "cannot delete your own account");
}

#[tokio::test]
async fn editor_cannot_delete_posts() {
    let auth = bearer(AdminRole::Editor, 3);
    let response = app().oneshot(delete("/api/posts/1", &auth)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn editor_cannot_delete_stories() {
    let auth = bearer(AdminRole::Editor, 3);
    let response = app()
        .oneshot(delete("/api/stories/1", &auth))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn capability_denial_is_forbidden_not_unauthorized() {
    // A valid token must never yield 401; the two failure kinds are distinct.
    let auth = bearer(AdminRole::Editor, 3);
    let response = app().oneshot(get("/api/admins", Some(&auth))).await.unwrap();
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Validation and token-only happy paths
// ============================================================================

#[tokio::test]
async fn login_requires_username_and_password() {
    let body = serde_json::json!({ "username": "", "password": "whatever" });
    let response = app()
        .oneshot(json_request("POST", "/api/auth/login", None, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "username": "dipesh", "password": "" });
    let response = app()
        .oneshot(json_request("POST", "/api/auth/login", None, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_with_valid_token_succeeds() {
    let auth = bearer(AdminRole::Editor, 3);
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::AUTHORIZATION, auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["message"], "logged out successfully");
}

#[tokio::test]
async fn story_validation_rejects_video_without_duration() {
    let auth = bearer(AdminRole::Admin, 2);
    let body = serde_json::json!({
        "title": "backstage clip",
        "kind": "video",
        "url": "https://cdn.nepalistar.com/clip.mp4"
    });

    let response = app()
        .oneshot(json_request("POST", "/api/stories", Some(&auth), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn story_validation_rejects_out_of_range_duration() {
    let auth = bearer(AdminRole::Admin, 2);
    let body = serde_json::json!({
        "title": "backstage clip",
        "kind": "video",
        "url": "https://cdn.nepalistar.com/clip.mp4",
        "duration_seconds": 61
    });

    let response = app()
        .oneshot(json_request("POST", "/api/stories", Some(&auth), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_validation_rejects_blank_title() {
    let auth = bearer(AdminRole::Editor, 3);
    let body = serde_json::json!({
        "title": "  ", "excerpt": "e", "category": "gossip", "author": "a"
    });

    let response = app()
        .oneshot(json_request("POST", "/api/posts", Some(&auth), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
