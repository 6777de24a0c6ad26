//! PostgreSQL feedback repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::FeedbackRow;
use crate::repo::{CreateFeedback, FeedbackRepository};

/// PostgreSQL feedback repository
#[derive(Clone)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    /// Create a new feedback repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<FeedbackRow>> {
        let feedback = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT id, user_id, category, rating, message, status,
                   created_at, updated_at
            FROM feedback
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feedback)
    }

    async fn list(&self) -> DbResult<Vec<FeedbackRow>> {
        let entries = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT id, user_id, category, rating, message, status,
                   created_at, updated_at
            FROM feedback
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn list_by_status(&self, status: &str) -> DbResult<Vec<FeedbackRow>> {
        let entries = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT id, user_id, category, rating, message, status,
                   created_at, updated_at
            FROM feedback
            WHERE status = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn create(&self, feedback: CreateFeedback) -> DbResult<FeedbackRow> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            r#"
            INSERT INTO feedback (user_id, category, rating, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, category, rating, message, status,
                      created_at, updated_at
            "#,
        )
        .bind(feedback.user_id)
        .bind(&feedback.category)
        .bind(feedback.rating)
        .bind(&feedback.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_status(&self, id: i32, status: &str) -> DbResult<FeedbackRow> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            r#"
            UPDATE feedback
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, user_id, category, rating, message, status,
                      created_at, updated_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }
}
