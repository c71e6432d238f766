//! Post route handlers.
//!
//! Reads are public; writes are capability-gated.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use nepali_star_core::{Capability, PostId, PostStatus};

use crate::db::PostRepository;
use crate::error::AppError;
use crate::middleware::{RequireAuth, require_capability};
use crate::models::{NewPost, Post, PostFilter};
use crate::state::AppState;

use super::MessageResponse;

/// Query parameters for listing posts.
#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub status: Option<PostStatus>,
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for creating or replacing a post.
///
/// Nepali fields, content blocks, images, pinned flag, and status are
/// optional and default to empty/draft, matching what the post editor sends
/// for a minimal draft.
#[derive(Debug, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub title_np: Option<String>,
    pub excerpt: String,
    pub excerpt_np: Option<String>,
    pub content: Option<serde_json::Value>,
    pub content_np: Option<serde_json::Value>,
    pub category: String,
    pub images: Option<serde_json::Value>,
    pub author: String,
    pub is_pinned: Option<bool>,
    pub status: Option<PostStatus>,
}

impl PostInput {
    fn into_new_post(self) -> Result<NewPost, AppError> {
        for (field, value) in [
            ("title", &self.title),
            ("excerpt", &self.excerpt),
            ("category", &self.category),
            ("author", &self.author),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{field} is required")));
            }
        }

        let empty_blocks = || serde_json::Value::Array(Vec::new());

        Ok(NewPost {
            title: self.title,
            title_np: self.title_np.unwrap_or_default(),
            excerpt: self.excerpt,
            excerpt_np: self.excerpt_np.unwrap_or_default(),
            content: self.content.unwrap_or_else(empty_blocks),
            content_np: self.content_np.unwrap_or_else(empty_blocks),
            category: self.category,
            images: self.images.unwrap_or_else(empty_blocks),
            author: self.author,
            is_pinned: self.is_pinned.unwrap_or(false),
            status: self.status.unwrap_or_default(),
        })
    }
}

/// List posts.
///
/// GET /api/posts
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let filter = PostFilter {
        status: query.status,
        category: query.category,
        limit: query.limit,
        offset: query.offset,
    };

    let posts = PostRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(posts))
}

/// Get a single post.
///
/// GET /api/posts/{id}
///
/// # Errors
///
/// Returns 404 for an unknown id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Post>, AppError> {
    let post = PostRepository::new(state.pool())
        .get_by_id(PostId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_owned()))?;

    Ok(Json(post))
}

/// Create a new post.
///
/// POST /api/posts
///
/// # Errors
///
/// Returns 401 without a valid token, 403 without `create_posts`.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Json(input): Json<PostInput>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    require_capability(&claims, Capability::CreatePosts)?;

    let new_post = input.into_new_post()?;
    let post = PostRepository::new(state.pool())
        .create(&new_post, claims.sub)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Replace an existing post.
///
/// PUT /api/posts/{id}
///
/// # Errors
///
/// Returns 403 without `edit_posts`, 404 for an unknown id.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Path(id): Path<i32>,
    Json(input): Json<PostInput>,
) -> Result<Json<Post>, AppError> {
    require_capability(&claims, Capability::EditPosts)?;

    let new_post = input.into_new_post()?;
    let post = PostRepository::new(state.pool())
        .update(PostId::new(id), &new_post)
        .await?;

    Ok(Json(post))
}

/// Delete a post.
///
/// DELETE /api/posts/{id}
///
/// # Errors
///
/// Returns 403 without `delete_posts`, 404 for an unknown id.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    require_capability(&claims, Capability::DeletePosts)?;

    PostRepository::new(state.pool())
        .delete(PostId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("post deleted successfully")))
}
