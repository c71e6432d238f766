//! Status enums for content entities.

use serde::{Deserialize, Serialize};

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "post_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// Media kind of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "story_kind", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum StoryKind {
    Image,
    Video,
}

impl std::fmt::Display for StoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_post_status_serde() {
        assert_eq!(
            serde_json::to_string(&PostStatus::Published).unwrap(),
            "\"published\""
        );
        let parsed: PostStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, PostStatus::Archived);
    }

    #[test]
    fn test_post_status_default_is_draft() {
        assert_eq!(PostStatus::default(), PostStatus::Draft);
    }

    #[test]
    fn test_story_kind_serde() {
        assert_eq!(
            serde_json::to_string(&StoryKind::Video).unwrap(),
            "\"video\""
        );
        let parsed: StoryKind = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(parsed, StoryKind::Image);
    }
}
