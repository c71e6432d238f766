//! Post domain types.
//!
//! Posts are bilingual (English/Nepali). Content blocks and image lists are
//! stored as opaque JSON documents; their internal structure belongs to the
//! front end.

use chrono::{DateTime, Utc};
use serde::Serialize;

use nepali_star_core::{AdminUserId, PostId, PostStatus};

/// A news post (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub title_np: String,
    pub excerpt: String,
    pub excerpt_np: String,
    /// Ordered content blocks (opaque JSON array).
    pub content: serde_json::Value,
    /// Nepali content blocks (opaque JSON array).
    pub content_np: serde_json::Value,
    pub category: String,
    /// Image descriptors (opaque JSON array).
    pub images: serde_json::Value,
    pub author: String,
    pub is_pinned: bool,
    pub status: PostStatus,
    pub created_by: Option<AdminUserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting or replacing a post.
#[derive(Debug)]
pub struct NewPost {
    pub title: String,
    pub title_np: String,
    pub excerpt: String,
    pub excerpt_np: String,
    pub content: serde_json::Value,
    pub content_np: serde_json::Value,
    pub category: String,
    pub images: serde_json::Value,
    pub author: String,
    pub is_pinned: bool,
    pub status: PostStatus,
}

/// Listing filters for posts.
#[derive(Debug, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PostFilter {
    /// Default page size when no limit is given.
    pub const DEFAULT_LIMIT: i64 = 50;
}
