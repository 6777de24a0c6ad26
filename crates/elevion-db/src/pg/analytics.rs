//! PostgreSQL analytics repository implementations
//!
//! User sessions, content view metrics, and per-service engagement
//! counters. Engagement writes are single atomic upserts so two concurrent
//! first touches for the same service cannot both insert.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::{ContentViewMetricRow, ServiceEngagementRow, UserSessionRow};
use crate::repo::{
    ContentMetricRepository, CreateContentMetric, CreateUserSession,
    ServiceEngagementRepository, UserSessionRepository,
};

/// PostgreSQL user session repository
#[derive(Clone)]
pub struct PgUserSessionRepository {
    pool: PgPool,
}

impl PgUserSessionRepository {
    /// Create a new user session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserSessionRepository for PgUserSessionRepository {
    async fn create(&self, session: CreateUserSession) -> DbResult<UserSessionRow> {
        let row = sqlx::query_as::<_, UserSessionRow>(
            r#"
            INSERT INTO user_sessions (user_id, session_start, duration_seconds,
                                       device, browser, referrer)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, session_start, duration_seconds, device,
                      browser, referrer, created_at
            "#,
        )
        .bind(session.user_id)
        .bind(session.session_start)
        .bind(session.duration_seconds)
        .bind(&session.device)
        .bind(&session.browser)
        .bind(&session.referrer)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_user(&self, user_id: i32) -> DbResult<Vec<UserSessionRow>> {
        let sessions = sqlx::query_as::<_, UserSessionRow>(
            r#"
            SELECT id, user_id, session_start, duration_seconds, device,
                   browser, referrer, created_at
            FROM user_sessions
            WHERE user_id = $1
            ORDER BY session_start DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    async fn count(&self) -> DbResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_sessions")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}

/// PostgreSQL content view metric repository
#[derive(Clone)]
pub struct PgContentMetricRepository {
    pool: PgPool,
}

impl PgContentMetricRepository {
    /// Create a new content metric repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentMetricRepository for PgContentMetricRepository {
    async fn create(&self, metric: CreateContentMetric) -> DbResult<ContentViewMetricRow> {
        let row = sqlx::query_as::<_, ContentViewMetricRow>(
            r#"
            INSERT INTO content_view_metrics (content_key, content_type, views,
                                              unique_views, avg_time_on_page,
                                              bounce_rate, conversion_rate)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, content_key, content_type, views, unique_views,
                      avg_time_on_page, bounce_rate, conversion_rate, recorded_at
            "#,
        )
        .bind(&metric.content_key)
        .bind(&metric.content_type)
        .bind(metric.views)
        .bind(metric.unique_views)
        .bind(metric.avg_time_on_page)
        .bind(metric.bounce_rate)
        .bind(metric.conversion_rate)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_content(
        &self,
        content_key: &str,
    ) -> DbResult<Option<ContentViewMetricRow>> {
        let metric = sqlx::query_as::<_, ContentViewMetricRow>(
            r#"
            SELECT id, content_key, content_type, views, unique_views,
                   avg_time_on_page, bounce_rate, conversion_rate, recorded_at
            FROM content_view_metrics
            WHERE content_key = $1
            "#,
        )
        .bind(content_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(metric)
    }

    async fn list_all(&self) -> DbResult<Vec<ContentViewMetricRow>> {
        let metrics = sqlx::query_as::<_, ContentViewMetricRow>(
            r#"
            SELECT id, content_key, content_type, views, unique_views,
                   avg_time_on_page, bounce_rate, conversion_rate, recorded_at
            FROM content_view_metrics
            ORDER BY views DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(metrics)
    }

    async fn count(&self) -> DbResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM content_view_metrics")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}

/// PostgreSQL service engagement repository
#[derive(Clone)]
pub struct PgServiceEngagementRepository {
    pool: PgPool,
}

impl PgServiceEngagementRepository {
    /// Create a new service engagement repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert_counter(&self, service_id: i32, column: Counter) -> DbResult<()> {
        // First writer wins the insert; the loser's statement becomes the
        // increment. No read-then-write anywhere in this path.
        let sql = match column {
            Counter::Clicks => {
                r#"
                INSERT INTO service_engagements (service_id, clicks, last_engaged_at)
                VALUES ($1, 1, NOW())
                ON CONFLICT (service_id)
                DO UPDATE SET clicks = service_engagements.clicks + 1,
                              last_engaged_at = NOW()
                "#
            }
            Counter::Inquiries => {
                r#"
                INSERT INTO service_engagements (service_id, inquiries, last_engaged_at)
                VALUES ($1, 1, NOW())
                ON CONFLICT (service_id)
                DO UPDATE SET inquiries = service_engagements.inquiries + 1,
                              last_engaged_at = NOW()
                "#
            }
            Counter::Conversions => {
                r#"
                INSERT INTO service_engagements (service_id, conversions, last_engaged_at)
                VALUES ($1, 1, NOW())
                ON CONFLICT (service_id)
                DO UPDATE SET conversions = service_engagements.conversions + 1,
                              last_engaged_at = NOW()
                "#
            }
        };

        sqlx::query(sql).bind(service_id).execute(&self.pool).await?;

        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Counter {
    Clicks,
    Inquiries,
    Conversions,
}

#[async_trait]
impl ServiceEngagementRepository for PgServiceEngagementRepository {
    async fn track_click(&self, service_id: i32) -> DbResult<()> {
        self.upsert_counter(service_id, Counter::Clicks).await
    }

    async fn track_inquiry(&self, service_id: i32) -> DbResult<()> {
        self.upsert_counter(service_id, Counter::Inquiries).await
    }

    async fn track_conversion(&self, service_id: i32) -> DbResult<()> {
        self.upsert_counter(service_id, Counter::Conversions).await
    }

    async fn find_by_service(
        &self,
        service_id: i32,
    ) -> DbResult<Option<ServiceEngagementRow>> {
        let engagement = sqlx::query_as::<_, ServiceEngagementRow>(
            r#"
            SELECT service_id, clicks, inquiries, conversions, last_engaged_at
            FROM service_engagements
            WHERE service_id = $1
            "#,
        )
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(engagement)
    }

    async fn list(&self) -> DbResult<Vec<ServiceEngagementRow>> {
        let engagements = sqlx::query_as::<_, ServiceEngagementRow>(
            r#"
            SELECT service_id, clicks, inquiries, conversions, last_engaged_at
            FROM service_engagements
            ORDER BY last_engaged_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(engagements)
    }
}
