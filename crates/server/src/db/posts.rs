//! Post repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use nepali_star_core::{AdminUserId, PostId, PostStatus};

use super::RepositoryError;
use crate::models::post::{NewPost, Post, PostFilter};

/// Internal row type for `PostgreSQL` post queries.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i32,
    title: String,
    title_np: String,
    excerpt: String,
    excerpt_np: String,
    content: serde_json::Value,
    content_np: serde_json::Value,
    category: String,
    images: serde_json::Value,
    author: String,
    is_pinned: bool,
    status: PostStatus,
    created_by: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::new(row.id),
            title: row.title,
            title_np: row.title_np,
            excerpt: row.excerpt,
            excerpt_np: row.excerpt_np,
            content: row.content,
            content_np: row.content_np,
            category: row.category,
            images: row.images,
            author: row.author,
            is_pinned: row.is_pinned,
            status: row.status,
            created_by: row.created_by.map(AdminUserId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for post database operations.
pub struct PostRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List posts, newest first, with optional status/category filters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepositoryError> {
        let limit = filter.limit.unwrap_or(PostFilter::DEFAULT_LIMIT);
        let offset = filter.offset.unwrap_or(0);

        let rows = sqlx::query_as::<_, PostRow>(
            r"
            SELECT id, title, title_np, excerpt, excerpt_np, content, content_np,
                   category, images, author, is_pinned, status, created_by,
                   created_at, updated_at
            FROM posts
            WHERE ($1::post_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(filter.status)
        .bind(filter.category.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a single post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(
            r"
            SELECT id, title, title_np, excerpt, excerpt_np, content, content_np,
                   category, images, author, is_pinned, status, created_by,
                   created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        new_post: &NewPost,
        created_by: AdminUserId,
    ) -> Result<Post, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(
            r"
            INSERT INTO posts (
                title, title_np, excerpt, excerpt_np, content, content_np,
                category, images, author, is_pinned, status, created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, title, title_np, excerpt, excerpt_np, content, content_np,
                      category, images, author, is_pinned, status, created_by,
                      created_at, updated_at
            ",
        )
        .bind(&new_post.title)
        .bind(&new_post.title_np)
        .bind(&new_post.excerpt)
        .bind(&new_post.excerpt_np)
        .bind(&new_post.content)
        .bind(&new_post.content_np)
        .bind(&new_post.category)
        .bind(&new_post.images)
        .bind(&new_post.author)
        .bind(new_post.is_pinned)
        .bind(new_post.status)
        .bind(created_by.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace an existing post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: PostId, new_post: &NewPost) -> Result<Post, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(
            r"
            UPDATE posts SET
                title = $1, title_np = $2, excerpt = $3, excerpt_np = $4,
                content = $5, content_np = $6, category = $7, images = $8,
                author = $9, is_pinned = $10, status = $11, updated_at = NOW()
            WHERE id = $12
            RETURNING id, title, title_np, excerpt, excerpt_np, content, content_np,
                      category, images, author, is_pinned, status, created_by,
                      created_at, updated_at
            ",
        )
        .bind(&new_post.title)
        .bind(&new_post.title_np)
        .bind(&new_post.excerpt)
        .bind(&new_post.excerpt_np)
        .bind(&new_post.content)
        .bind(&new_post.content_np)
        .bind(&new_post.category)
        .bind(&new_post.images)
        .bind(&new_post.author)
        .bind(new_post.is_pinned)
        .bind(new_post.status)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
