//! Story route handlers.
//!
//! Reads are public; writes are capability-gated.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use nepali_star_core::{Capability, StoryId, StoryKind};

use crate::db::StoryRepository;
use crate::error::AppError;
use crate::middleware::{RequireAuth, require_capability};
use crate::models::{NewStory, Story};
use crate::state::AppState;

use super::MessageResponse;

/// Valid video duration range in seconds.
const DURATION_RANGE: std::ops::RangeInclusive<i32> = 1..=60;

/// Query parameters for listing stories.
#[derive(Debug, Deserialize)]
pub struct StoryListQuery {
    pub active: Option<bool>,
}

/// Request body for creating or replacing a story.
#[derive(Debug, Deserialize)]
pub struct StoryInput {
    pub title: String,
    pub kind: StoryKind,
    pub url: String,
    pub thumbnail: Option<String>,
    pub duration_seconds: Option<i32>,
    pub is_active: Option<bool>,
}

impl StoryInput {
    fn into_new_story(self) -> Result<NewStory, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_owned()));
        }
        if self.url.trim().is_empty() {
            return Err(AppError::BadRequest("url is required".to_owned()));
        }

        match (self.kind, self.duration_seconds) {
            (StoryKind::Video, None) => {
                return Err(AppError::BadRequest(
                    "duration_seconds is required for video stories".to_owned(),
                ));
            }
            (_, Some(d)) if !DURATION_RANGE.contains(&d) => {
                return Err(AppError::BadRequest(
                    "duration_seconds must be between 1 and 60".to_owned(),
                ));
            }
            _ => {}
        }

        Ok(NewStory {
            title: self.title,
            kind: self.kind,
            url: self.url,
            thumbnail: self.thumbnail.filter(|t| !t.is_empty()),
            duration_seconds: self.duration_seconds,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// List stories.
///
/// GET /api/stories
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<StoryListQuery>,
) -> Result<Json<Vec<Story>>, AppError> {
    let stories = StoryRepository::new(state.pool()).list(query.active).await?;
    Ok(Json(stories))
}

/// Create a new story.
///
/// POST /api/stories
///
/// # Errors
///
/// Returns 401 without a valid token, 403 without `create_posts`.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Json(input): Json<StoryInput>,
) -> Result<(StatusCode, Json<Story>), AppError> {
    require_capability(&claims, Capability::CreatePosts)?;

    let new_story = input.into_new_story()?;
    let story = StoryRepository::new(state.pool())
        .create(&new_story, claims.sub)
        .await?;

    Ok((StatusCode::CREATED, Json(story)))
}

/// Replace an existing story.
///
/// PUT /api/stories/{id}
///
/// # Errors
///
/// Returns 403 without `edit_posts`, 404 for an unknown id.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Path(id): Path<i32>,
    Json(input): Json<StoryInput>,
) -> Result<Json<Story>, AppError> {
    require_capability(&claims, Capability::EditPosts)?;

    let new_story = input.into_new_story()?;
    let story = StoryRepository::new(state.pool())
        .update(StoryId::new(id), &new_story)
        .await?;

    Ok(Json(story))
}

/// Toggle a story's active flag.
///
/// PATCH /api/stories/{id}/toggle
///
/// # Errors
///
/// Returns 403 without `edit_posts`, 404 for an unknown id.
pub async fn toggle(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<Story>, AppError> {
    require_capability(&claims, Capability::EditPosts)?;

    let story = StoryRepository::new(state.pool())
        .toggle_active(StoryId::new(id))
        .await?;

    Ok(Json(story))
}

/// Delete a story.
///
/// DELETE /api/stories/{id}
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

    StoryRepository::new(state.pool())
        .delete(StoryId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("story deleted successfully")))
}
