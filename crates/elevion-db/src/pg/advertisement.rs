//! PostgreSQL advertisement repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::AdvertisementRow;
use crate::repo::{AdvertisementRepository, CreateAdvertisement, UpdateAdvertisement};

/// PostgreSQL advertisement repository
#[derive(Clone)]
pub struct PgAdvertisementRepository {
    pool: PgPool,
}

impl PgAdvertisementRepository {
    /// Create a new advertisement repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdvertisementRepository for PgAdvertisementRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<AdvertisementRow>> {
        let ad = sqlx::query_as::<_, AdvertisementRow>(
            r#"
            SELECT id, title, image_url, target_url, placement, start_date,
                   end_date, is_active, impressions, clicks, created_at, updated_at
            FROM advertisements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ad)
    }

    async fn list_all(&self) -> DbResult<Vec<AdvertisementRow>> {
        let ads = sqlx::query_as::<_, AdvertisementRow>(
            r#"
            SELECT id, title, image_url, target_url, placement, start_date,
                   end_date, is_active, impressions, clicks, created_at, updated_at
            FROM advertisements
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ads)
    }

    async fn list_active(&self, now: DateTime<Utc>) -> DbResult<Vec<AdvertisementRow>> {
        let ads = sqlx::query_as::<_, AdvertisementRow>(
            r#"
            SELECT id, title, image_url, target_url, placement, start_date,
                   end_date, is_active, impressions, clicks, created_at, updated_at
            FROM advertisements
            WHERE is_active = TRUE AND start_date < $1 AND end_date > $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(ads)
    }

    async fn create(&self, ad: CreateAdvertisement) -> DbResult<AdvertisementRow> {
        let row = sqlx::query_as::<_, AdvertisementRow>(
            r#"
            INSERT INTO advertisements (title, image_url, target_url, placement,
                                        start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, image_url, target_url, placement, start_date,
                      end_date, is_active, impressions, clicks, created_at, updated_at
            "#,
        )
        .bind(&ad.title)
        .bind(&ad.image_url)
        .bind(&ad.target_url)
        .bind(&ad.placement)
        .bind(ad.start_date)
        .bind(ad.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i32, update: UpdateAdvertisement) -> DbResult<AdvertisementRow> {
        let row = sqlx::query_as::<_, AdvertisementRow>(
            r#"
            UPDATE advertisements
            SET title = COALESCE($1, title),
                image_url = COALESCE($2, image_url),
                target_url = COALESCE($3, target_url),
                placement = COALESCE($4, placement),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $8
            RETURNING id, title, image_url, target_url, placement, start_date,
                      end_date, is_active, impressions, clicks, created_at, updated_at
            "#,
        )
        .bind(&update.title)
        .bind(&update.image_url)
        .bind(&update.target_url)
        .bind(&update.placement)
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(update.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }

    async fn increment_impressions(&self, id: i32) -> DbResult<()> {
        // Store-side arithmetic; never read-modify-write, so concurrent
        // increments cannot lose updates.
        sqlx::query("UPDATE advertisements SET impressions = impressions + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn increment_clicks(&self, id: i32) -> DbResult<()> {
        sqlx::query("UPDATE advertisements SET clicks = clicks + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
