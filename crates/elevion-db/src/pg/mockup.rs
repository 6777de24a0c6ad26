//! PostgreSQL mockup request repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::MockupRequestRow;
use crate::repo::{CreateMockupRequest, MockupRequestRepository};

/// PostgreSQL mockup request repository
#[derive(Clone)]
pub struct PgMockupRequestRepository {
    pool: PgPool,
}

impl PgMockupRequestRepository {
    /// Create a new mockup request repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MockupRequestRepository for PgMockupRequestRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<MockupRequestRow>> {
        let request = sqlx::query_as::<_, MockupRequestRow>(
            r#"
            SELECT id, user_id, business_type, requirements, status,
                   created_at, updated_at
            FROM mockup_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn list_by_user(&self, user_id: i32) -> DbResult<Vec<MockupRequestRow>> {
        let requests = sqlx::query_as::<_, MockupRequestRow>(
            r#"
            SELECT id, user_id, business_type, requirements, status,
                   created_at, updated_at
            FROM mockup_requests
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn list_by_status(&self, status: &str) -> DbResult<Vec<MockupRequestRow>> {
        let requests = sqlx::query_as::<_, MockupRequestRow>(
            r#"
            SELECT id, user_id, business_type, requirements, status,
                   created_at, updated_at
            FROM mockup_requests
            WHERE status = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn list_recent(&self, limit: i64) -> DbResult<Vec<MockupRequestRow>> {
        let requests = sqlx::query_as::<_, MockupRequestRow>(
            r#"
            SELECT id, user_id, business_type, requirements, status,
                   created_at, updated_at
            FROM mockup_requests
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn create(&self, request: CreateMockupRequest) -> DbResult<MockupRequestRow> {
        let row = sqlx::query_as::<_, MockupRequestRow>(
            r#"
            INSERT INTO mockup_requests (user_id, business_type, requirements, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, business_type, requirements, status,
                      created_at, updated_at
            "#,
        )
        .bind(request.user_id)
        .bind(&request.business_type)
        .bind(&request.requirements)
        .bind(&request.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_status(&self, id: i32, status: &str) -> DbResult<MockupRequestRow> {
        let row = sqlx::query_as::<_, MockupRequestRow>(
            r#"
            UPDATE mockup_requests
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, user_id, business_type, requirements, status,
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
