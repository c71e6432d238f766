//! Story repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use nepali_star_core::{AdminUserId, StoryId, StoryKind};

use super::RepositoryError;
use crate::models::story::{NewStory, Story};

/// Internal row type for `PostgreSQL` story queries.
#[derive(Debug, sqlx::FromRow)]
struct StoryRow {
    id: i32,
    title: String,
    kind: StoryKind,
    url: String,
    thumbnail: Option<String>,
    duration_seconds: Option<i32>,
    is_active: bool,
    created_by: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoryRow> for Story {
    fn from(row: StoryRow) -> Self {
        Self {
            id: StoryId::new(row.id),
            title: row.title,
            kind: row.kind,
            url: row.url,
            thumbnail: row.thumbnail,
            duration_seconds: row.duration_seconds,
            is_active: row.is_active,
            created_by: row.created_by.map(AdminUserId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for story database operations.
pub struct StoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoryRepository<'a> {
    /// Create a new story repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List stories, newest first, optionally filtered by active flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, active: Option<bool>) -> Result<Vec<Story>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoryRow>(
            r"
            SELECT id, title, kind, url, thumbnail, duration_seconds,
                   is_active, created_by, created_at, updated_at
            FROM stories
            WHERE ($1::boolean IS NULL OR is_active = $1)
            ORDER BY created_at DESC
            ",
        )
        .bind(active)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a new story.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        new_story: &NewStory,
        created_by: AdminUserId,
    ) -> Result<Story, RepositoryError> {
        let row = sqlx::query_as::<_, StoryRow>(
            r"
            INSERT INTO stories (title, kind, url, thumbnail, duration_seconds, is_active, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, kind, url, thumbnail, duration_seconds,
                      is_active, created_by, created_at, updated_at
            ",
        )
        .bind(&new_story.title)
        .bind(new_story.kind)
        .bind(&new_story.url)
        .bind(new_story.thumbnail.as_deref())
        .bind(new_story.duration_seconds)
        .bind(new_story.is_active)
        .bind(created_by.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace an existing story.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the story doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: StoryId, new_story: &NewStory) -> Result<Story, RepositoryError> {
        let row = sqlx::query_as::<_, StoryRow>(
            r"
            UPDATE stories SET
                title = $1, kind = $2, url = $3, thumbnail = $4,
                duration_seconds = $5, is_active = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING id, title, kind, url, thumbnail, duration_seconds,
                      is_active, created_by, created_at, updated_at
            ",
        )
        .bind(&new_story.title)
        .bind(new_story.kind)
        .bind(&new_story.url)
        .bind(new_story.thumbnail.as_deref())
        .bind(new_story.duration_seconds)
        .bind(new_story.is_active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Flip a story's active flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the story doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn toggle_active(&self, id: StoryId) -> Result<Story, RepositoryError> {
        let row = sqlx::query_as::<_, StoryRow>(
            r"
            UPDATE stories SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, kind, url, thumbnail, duration_seconds,
                      is_active, created_by, created_at, updated_at
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a story by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the story doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: StoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
