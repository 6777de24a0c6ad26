//! PostgreSQL blog post repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::BlogPostRow;
use crate::repo::{BlogPostRepository, CreateBlogPost};

/// PostgreSQL blog post repository
#[derive(Clone)]
pub struct PgBlogPostRepository {
    pool: PgPool,
}

impl PgBlogPostRepository {
    /// Create a new blog post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogPostRepository for PgBlogPostRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<BlogPostRow>> {
        let post = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT id, title, slug, excerpt, content, category, is_published,
                   created_at, updated_at
            FROM blog_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_slug(&self, slug: &str) -> DbResult<Option<BlogPostRow>> {
        let post = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT id, title, slug, excerpt, content, category, is_published,
                   created_at, updated_at
            FROM blog_posts
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_published(&self) -> DbResult<Vec<BlogPostRow>> {
        let posts = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT id, title, slug, excerpt, content, category, is_published,
                   created_at, updated_at
            FROM blog_posts
            WHERE is_published = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn create(&self, post: CreateBlogPost) -> DbResult<BlogPostRow> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            r#"
            INSERT INTO blog_posts (title, slug, excerpt, content, category, is_published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, slug, excerpt, content, category, is_published,
                      created_at, updated_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.category)
        .bind(post.is_published)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<BlogPostRow>> {
        let pattern = format!("%{query}%");
        let posts = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT id, title, slug, excerpt, content, category, is_published,
                   created_at, updated_at
            FROM blog_posts
            WHERE title ILIKE $1 OR excerpt ILIKE $1 OR content ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}
