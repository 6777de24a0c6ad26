//! PostgreSQL user subscription repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::UserSubscriptionRow;
use crate::repo::{CreateUserSubscription, UserSubscriptionRepository};

/// PostgreSQL user subscription repository
#[derive(Clone)]
pub struct PgUserSubscriptionRepository {
    pool: PgPool,
}

impl PgUserSubscriptionRepository {
    /// Create a new user subscription repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserSubscriptionRepository for PgUserSubscriptionRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<UserSubscriptionRow>> {
        let sub = sqlx::query_as::<_, UserSubscriptionRow>(
            r#"
            SELECT id, user_id, plan_id, status, stripe_subscription_id,
                   current_period_end, created_at, updated_at
            FROM user_subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sub)
    }

    async fn find_active_by_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> DbResult<Option<UserSubscriptionRow>> {
        // A user may carry several historical rows; at most one is expected
        // to satisfy the active window at any instant (advisory, not a
        // uniqueness constraint), so take the newest.
        let sub = sqlx::query_as::<_, UserSubscriptionRow>(
            r#"
            SELECT id, user_id, plan_id, status, stripe_subscription_id,
                   current_period_end, created_at, updated_at
            FROM user_subscriptions
            WHERE user_id = $1 AND status = 'active' AND current_period_end > $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sub)
    }

    async fn list_by_user(&self, user_id: i32) -> DbResult<Vec<UserSubscriptionRow>> {
        let subs = sqlx::query_as::<_, UserSubscriptionRow>(
            r#"
            SELECT id, user_id, plan_id, status, stripe_subscription_id,
                   current_period_end, created_at, updated_at
            FROM user_subscriptions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subs)
    }

    async fn create(&self, sub: CreateUserSubscription) -> DbResult<UserSubscriptionRow> {
        let row = sqlx::query_as::<_, UserSubscriptionRow>(
            r#"
            INSERT INTO user_subscriptions (user_id, plan_id, status,
                                            stripe_subscription_id, current_period_end)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, plan_id, status, stripe_subscription_id,
                      current_period_end, created_at, updated_at
            "#,
        )
        .bind(sub.user_id)
        .bind(sub.plan_id)
        .bind(&sub.status)
        .bind(&sub.stripe_subscription_id)
        .bind(sub.current_period_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_status(&self, id: i32, status: &str) -> DbResult<UserSubscriptionRow> {
        let row = sqlx::query_as::<_, UserSubscriptionRow>(
            r#"
            UPDATE user_subscriptions
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, user_id, plan_id, status, stripe_subscription_id,
                      current_period_end, created_at, updated_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }

    async fn update_period_end(
        &self,
        id: i32,
        period_end: DateTime<Utc>,
    ) -> DbResult<UserSubscriptionRow> {
        let row = sqlx::query_as::<_, UserSubscriptionRow>(
            r#"
            UPDATE user_subscriptions
            SET current_period_end = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, user_id, plan_id, status, stripe_subscription_id,
                      current_period_end, created_at, updated_at
            "#,
        )
        .bind(period_end)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }
}
