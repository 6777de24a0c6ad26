//! PostgreSQL contact-form repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::ContactRow;
use crate::repo::{ContactRepository, CreateContact};

/// PostgreSQL contact repository
#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    /// Create a new contact repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<ContactRow>> {
        let contact = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, name, email, company, message, created_at
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn list(&self) -> DbResult<Vec<ContactRow>> {
        let contacts = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, name, email, company, message, created_at
            FROM contacts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    async fn create(&self, contact: CreateContact) -> DbResult<ContactRow> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (name, email, company, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, company, message, created_at
            "#,
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.company)
        .bind(&contact.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
