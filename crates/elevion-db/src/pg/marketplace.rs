//! PostgreSQL marketplace repository implementations
//!
//! Items and orders. Services are not a separate table: they are items
//! filtered on `category = 'service'`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::{MarketplaceItemRow, MarketplaceOrderRow};
use crate::repo::{
    CreateMarketplaceItem, CreateMarketplaceOrder, MarketplaceItemRepository,
    MarketplaceOrderRepository, UpdateMarketplaceItem, SERVICE_CATEGORY,
};

/// PostgreSQL marketplace item repository
#[derive(Clone)]
pub struct PgMarketplaceItemRepository {
    pool: PgPool,
}

impl PgMarketplaceItemRepository {
    /// Create a new marketplace item repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MarketplaceItemRepository for PgMarketplaceItemRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<MarketplaceItemRow>> {
        let item = sqlx::query_as::<_, MarketplaceItemRow>(
            r#"
            SELECT id, name, description, category, price, seller_id,
                   is_available, created_at, updated_at
            FROM marketplace_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn list_all(&self) -> DbResult<Vec<MarketplaceItemRow>> {
        let items = sqlx::query_as::<_, MarketplaceItemRow>(
            r#"
            SELECT id, name, description, category, price, seller_id,
                   is_available, created_at, updated_at
            FROM marketplace_items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn list_available(&self) -> DbResult<Vec<MarketplaceItemRow>> {
        let items = sqlx::query_as::<_, MarketplaceItemRow>(
            r#"
            SELECT id, name, description, category, price, seller_id,
                   is_available, created_at, updated_at
            FROM marketplace_items
            WHERE is_available = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn create(&self, item: CreateMarketplaceItem) -> DbResult<MarketplaceItemRow> {
        let row = sqlx::query_as::<_, MarketplaceItemRow>(
            r#"
            INSERT INTO marketplace_items (name, description, category, price, seller_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, category, price, seller_id,
                      is_available, created_at, updated_at
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.category)
        .bind(item.price)
        .bind(item.seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        update: UpdateMarketplaceItem,
    ) -> DbResult<MarketplaceItemRow> {
        let row = sqlx::query_as::<_, MarketplaceItemRow>(
            r#"
            UPDATE marketplace_items
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                category = COALESCE($3, category),
                price = COALESCE($4, price),
                is_available = COALESCE($5, is_available),
                updated_at = NOW()
            WHERE id = $6
            RETURNING id, name, description, category, price, seller_id,
                      is_available, created_at, updated_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(&update.category)
        .bind(update.price)
        .bind(update.is_available)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }

    async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<MarketplaceItemRow>> {
        let pattern = format!("%{query}%");
        let items = sqlx::query_as::<_, MarketplaceItemRow>(
            r#"
            SELECT id, name, description, category, price, seller_id,
                   is_available, created_at, updated_at
            FROM marketplace_items
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn search_services(
        &self,
        query: &str,
        limit: i64,
    ) -> DbResult<Vec<MarketplaceItemRow>> {
        let pattern = format!("%{query}%");
        let items = sqlx::query_as::<_, MarketplaceItemRow>(
            r#"
            SELECT id, name, description, category, price, seller_id,
                   is_available, created_at, updated_at
            FROM marketplace_items
            WHERE category = $1 AND (name ILIKE $2 OR description ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(SERVICE_CATEGORY)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

/// PostgreSQL marketplace order repository
#[derive(Clone)]
pub struct PgMarketplaceOrderRepository {
    pool: PgPool,
}

impl PgMarketplaceOrderRepository {
    /// Create a new marketplace order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MarketplaceOrderRepository for PgMarketplaceOrderRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<MarketplaceOrderRow>> {
        let order = sqlx::query_as::<_, MarketplaceOrderRow>(
            r#"
            SELECT id, item_id, buyer_id, status, total, created_at, updated_at
            FROM marketplace_orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn list_by_buyer(&self, buyer_id: i32) -> DbResult<Vec<MarketplaceOrderRow>> {
        let orders = sqlx::query_as::<_, MarketplaceOrderRow>(
            r#"
            SELECT id, item_id, buyer_id, status, total, created_at, updated_at
            FROM marketplace_orders
            WHERE buyer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn create(&self, order: CreateMarketplaceOrder) -> DbResult<MarketplaceOrderRow> {
        let row = sqlx::query_as::<_, MarketplaceOrderRow>(
            r#"
            INSERT INTO marketplace_orders (item_id, buyer_id, status, total)
            VALUES ($1, $2, $3, $4)
            RETURNING id, item_id, buyer_id, status, total, created_at, updated_at
            "#,
        )
        .bind(order.item_id)
        .bind(order.buyer_id)
        .bind(&order.status)
        .bind(order.total)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_status(&self, id: i32, status: &str) -> DbResult<MarketplaceOrderRow> {
        let row = sqlx::query_as::<_, MarketplaceOrderRow>(
            r#"
            UPDATE marketplace_orders
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, item_id, buyer_id, status, total, created_at, updated_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }
}
