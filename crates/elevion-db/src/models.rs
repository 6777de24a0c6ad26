//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! Status columns stay `String` at this layer; parse helpers at the bottom
//! convert into the closed enums from `elevion-types`.

use chrono::{DateTime, Utc};
use elevion_types::{
    FeedbackStatus, MockupStatus, OrderStatus, RecommendationStatus, StatusParseError,
    SubscriptionStatus,
};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub stripe_customer_id: Option<String>,
    pub verified: bool,
    pub preferences: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact-form submission row
#[derive(Debug, Clone, FromRow)]
pub struct ContactRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Client preview row, keyed by a human-chosen code
#[derive(Debug, Clone, FromRow)]
pub struct ClientPreviewRow {
    pub code: String,
    pub client_name: String,
    pub project_id: Option<i32>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Subscription plan row
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionPlanRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub interval: String,
    pub features: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User subscription row
#[derive(Debug, Clone, FromRow)]
pub struct UserSubscriptionRow {
    pub id: i32,
    pub user_id: i32,
    pub plan_id: i32,
    pub status: String,
    pub stripe_subscription_id: Option<String>,
    pub current_period_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Marketplace item row; services are items with `category = 'service'`
#[derive(Debug, Clone, FromRow)]
pub struct MarketplaceItemRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub seller_id: Option<i32>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Marketplace order row
#[derive(Debug, Clone, FromRow)]
pub struct MarketplaceOrderRow {
    pub id: i32,
    pub item_id: i32,
    pub buyer_id: i32,
    pub status: String,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Advertisement row with monotonic impression/click counters
#[derive(Debug, Clone, FromRow)]
pub struct AdvertisementRow {
    pub id: i32,
    pub title: String,
    pub image_url: Option<String>,
    pub target_url: Option<String>,
    pub placement: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub impressions: i32,
    pub clicks: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Feedback row
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackRow {
    pub id: i32,
    pub user_id: Option<i32>,
    pub category: String,
    pub rating: Option<i32>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mockup request row
#[derive(Debug, Clone, FromRow)]
pub struct MockupRequestRow {
    pub id: i32,
    pub user_id: i32,
    pub business_type: String,
    pub requirements: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Price recommendation row (mutable, reviewed via `status`)
#[derive(Debug, Clone, FromRow)]
pub struct PriceRecommendationRow {
    pub id: i32,
    pub plan_id: i32,
    pub recommended_price: Decimal,
    pub reasoning: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Price history row (append-only)
#[derive(Debug, Clone, FromRow)]
pub struct PriceHistoryRow {
    pub id: i32,
    pub plan_id: i32,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Synthetic or recorded user session row
#[derive(Debug, Clone, FromRow)]
pub struct UserSessionRow {
    pub id: i32,
    pub user_id: i32,
    pub session_start: DateTime<Utc>,
    pub duration_seconds: i32,
    pub device: String,
    pub browser: String,
    pub referrer: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregated content view metrics row
#[derive(Debug, Clone, FromRow)]
pub struct ContentViewMetricRow {
    pub id: i32,
    pub content_key: String,
    pub content_type: String,
    pub views: i32,
    pub unique_views: i32,
    pub avg_time_on_page: f64,
    pub bounce_rate: f64,
    pub conversion_rate: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Per-service engagement counters, keyed by service id
#[derive(Debug, Clone, FromRow)]
pub struct ServiceEngagementRow {
    pub service_id: i32,
    pub clicks: i32,
    pub inquiries: i32,
    pub conversions: i32,
    pub last_engaged_at: DateTime<Utc>,
}

/// Blog post row
#[derive(Debug, Clone, FromRow)]
pub struct BlogPostRow {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Parse helpers from row status strings into the closed domain enums.

impl UserSubscriptionRow {
    /// Parse the stored status string
    pub fn status(&self) -> Result<SubscriptionStatus, StatusParseError> {
        self.status.parse()
    }
}

impl MarketplaceOrderRow {
    /// Parse the stored status string
    pub fn status(&self) -> Result<OrderStatus, StatusParseError> {
        self.status.parse()
    }
}

impl FeedbackRow {
    /// Parse the stored status string
    pub fn status(&self) -> Result<FeedbackStatus, StatusParseError> {
        self.status.parse()
    }
}

impl MockupRequestRow {
    /// Parse the stored status string
    pub fn status(&self) -> Result<MockupStatus, StatusParseError> {
        self.status.parse()
    }
}

impl PriceRecommendationRow {
    /// Parse the stored status string
    pub fn status(&self) -> Result<RecommendationStatus, StatusParseError> {
        self.status.parse()
    }
}
