//! Story domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use nepali_star_core::{AdminUserId, StoryId, StoryKind};

/// A short-form story (image or video, domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    pub kind: StoryKind,
    pub url: String,
    pub thumbnail: Option<String>,
    /// Playback duration. Required for videos, 1-60 seconds.
    pub duration_seconds: Option<i32>,
    pub is_active: bool,
    pub created_by: Option<AdminUserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting or replacing a story.
#[derive(Debug)]
pub struct NewStory {
    pub title: String,
    pub kind: StoryKind,
    pub url: String,
    pub thumbnail: Option<String>,
    pub duration_seconds: Option<i32>,
    pub is_active: bool,
}
