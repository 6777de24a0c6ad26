//! PostgreSQL pricing repository implementations
//!
//! Subscription plans plus their append-only price history and the mutable
//! price recommendations that reference them.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::{PriceHistoryRow, PriceRecommendationRow, SubscriptionPlanRow};
use crate::repo::{
    CreatePriceHistory, CreatePriceRecommendation, CreateSubscriptionPlan,
    PriceHistoryRepository, PriceRecommendationRepository, SubscriptionPlanRepository,
    UpdateSubscriptionPlan,
};

/// PostgreSQL subscription plan repository
#[derive(Clone)]
pub struct PgSubscriptionPlanRepository {
    pool: PgPool,
}

impl PgSubscriptionPlanRepository {
    /// Create a new subscription plan repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionPlanRepository for PgSubscriptionPlanRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<SubscriptionPlanRow>> {
        let plan = sqlx::query_as::<_, SubscriptionPlanRow>(
            r#"
            SELECT id, name, description, price, interval, features, is_active,
                   created_at, updated_at
            FROM subscription_plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    async fn list_all(&self) -> DbResult<Vec<SubscriptionPlanRow>> {
        let plans = sqlx::query_as::<_, SubscriptionPlanRow>(
            r#"
            SELECT id, name, description, price, interval, features, is_active,
                   created_at, updated_at
            FROM subscription_plans
            ORDER BY price ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    async fn list_active(&self) -> DbResult<Vec<SubscriptionPlanRow>> {
        let plans = sqlx::query_as::<_, SubscriptionPlanRow>(
            r#"
            SELECT id, name, description, price, interval, features, is_active,
                   created_at, updated_at
            FROM subscription_plans
            WHERE is_active = TRUE
            ORDER BY price ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    async fn create(&self, plan: CreateSubscriptionPlan) -> DbResult<SubscriptionPlanRow> {
        let row = sqlx::query_as::<_, SubscriptionPlanRow>(
            r#"
            INSERT INTO subscription_plans (name, description, price, interval, features)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, interval, features, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.price)
        .bind(&plan.interval)
        .bind(&plan.features)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        update: UpdateSubscriptionPlan,
    ) -> DbResult<SubscriptionPlanRow> {
        let row = sqlx::query_as::<_, SubscriptionPlanRow>(
            r#"
            UPDATE subscription_plans
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                price = COALESCE($3, price),
                interval = COALESCE($4, interval),
                features = COALESCE($5, features),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $7
            RETURNING id, name, description, price, interval, features, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .bind(&update.interval)
        .bind(&update.features)
        .bind(update.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }
}

/// PostgreSQL price recommendation repository
#[derive(Clone)]
pub struct PgPriceRecommendationRepository {
    pool: PgPool,
}

impl PgPriceRecommendationRepository {
    /// Create a new price recommendation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceRecommendationRepository for PgPriceRecommendationRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<PriceRecommendationRow>> {
        let rec = sqlx::query_as::<_, PriceRecommendationRow>(
            r#"
            SELECT id, plan_id, recommended_price, reasoning, status,
                   created_at, updated_at
            FROM price_recommendations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn list_by_plan(&self, plan_id: i32) -> DbResult<Vec<PriceRecommendationRow>> {
        let recs = sqlx::query_as::<_, PriceRecommendationRow>(
            r#"
            SELECT id, plan_id, recommended_price, reasoning, status,
                   created_at, updated_at
            FROM price_recommendations
            WHERE plan_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(recs)
    }

    async fn create(
        &self,
        rec: CreatePriceRecommendation,
    ) -> DbResult<PriceRecommendationRow> {
        let row = sqlx::query_as::<_, PriceRecommendationRow>(
            r#"
            INSERT INTO price_recommendations (plan_id, recommended_price, reasoning)
            VALUES ($1, $2, $3)
            RETURNING id, plan_id, recommended_price, reasoning, status,
                      created_at, updated_at
            "#,
        )
        .bind(rec.plan_id)
        .bind(rec.recommended_price)
        .bind(&rec.reasoning)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_status(&self, id: i32, status: &str) -> DbResult<PriceRecommendationRow> {
        let row = sqlx::query_as::<_, PriceRecommendationRow>(
            r#"
            UPDATE price_recommendations
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, plan_id, recommended_price, reasoning, status,
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

/// PostgreSQL price history repository
#[derive(Clone)]
pub struct PgPriceHistoryRepository {
    pool: PgPool,
}

impl PgPriceHistoryRepository {
    /// Create a new price history repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceHistoryRepository for PgPriceHistoryRepository {
    async fn append(&self, entry: CreatePriceHistory) -> DbResult<PriceHistoryRow> {
        let row = sqlx::query_as::<_, PriceHistoryRow>(
            r#"
            INSERT INTO price_history (plan_id, old_price, new_price)
            VALUES ($1, $2, $3)
            RETURNING id, plan_id, old_price, new_price, created_at
            "#,
        )
        .bind(entry.plan_id)
        .bind(entry.old_price)
        .bind(entry.new_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_plan(&self, plan_id: i32) -> DbResult<Vec<PriceHistoryRow>> {
        let entries = sqlx::query_as::<_, PriceHistoryRow>(
            r#"
            SELECT id, plan_id, old_price, new_price, created_at
            FROM price_history
            WHERE plan_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
