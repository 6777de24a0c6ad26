//! PostgreSQL client preview repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::ClientPreviewRow;
use crate::repo::{ClientPreviewRepository, CreateClientPreview};

/// PostgreSQL client preview repository
#[derive(Clone)]
pub struct PgClientPreviewRepository {
    pool: PgPool,
}

impl PgClientPreviewRepository {
    /// Create a new client preview repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientPreviewRepository for PgClientPreviewRepository {
    async fn find_by_code(&self, code: &str) -> DbResult<Option<ClientPreviewRow>> {
        let preview = sqlx::query_as::<_, ClientPreviewRow>(
            r#"
            SELECT code, client_name, project_id, expires_at, is_active, created_at
            FROM client_previews
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(preview)
    }

    async fn find_valid_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> DbResult<Option<ClientPreviewRow>> {
        let preview = sqlx::query_as::<_, ClientPreviewRow>(
            r#"
            SELECT code, client_name, project_id, expires_at, is_active, created_at
            FROM client_previews
            WHERE code = $1 AND is_active = TRUE AND expires_at > $2
            "#,
        )
        .bind(code)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(preview)
    }

    async fn list(&self) -> DbResult<Vec<ClientPreviewRow>> {
        let previews = sqlx::query_as::<_, ClientPreviewRow>(
            r#"
            SELECT code, client_name, project_id, expires_at, is_active, created_at
            FROM client_previews
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(previews)
    }

    async fn create(&self, preview: CreateClientPreview) -> DbResult<ClientPreviewRow> {
        let row = sqlx::query_as::<_, ClientPreviewRow>(
            r#"
            INSERT INTO client_previews (code, client_name, project_id, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING code, client_name, project_id, expires_at, is_active, created_at
            "#,
        )
        .bind(&preview.code)
        .bind(&preview.client_name)
        .bind(preview.project_id)
        .bind(preview.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn deactivate(&self, code: &str) -> DbResult<()> {
        sqlx::query("UPDATE client_previews SET is_active = FALSE WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM client_previews")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
