//! Repository traits
//!
//! Async repository interfaces, one per entity group. These are the whole
//! gateway contract: route handlers and services depend on the traits, the
//! `pg` module provides the Postgres implementations, and tests substitute
//! in-memory ones.
//!
//! Conventions shared by every trait:
//! - `find_*` returns `Ok(None)` for a missing row, never an error.
//! - `create` propagates constraint violations unwrapped.
//! - full updates merge only the supplied fields, always refresh
//!   `updated_at`, and fail with `DbError::NotFound` for a missing id.
//! - queries with a validity window take `now` as an explicit parameter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::DbResult;
use crate::models::*;

/// Marketplace category under which services are listed
pub const SERVICE_CATEGORY: &str = "service";

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<UserRow>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// List every user, oldest first
    async fn list_all(&self) -> DbResult<Vec<UserRow>>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Merge the supplied fields into an existing user
    async fn update(&self, id: i32, update: UpdateUser) -> DbResult<UserRow>;

    /// Attach a Stripe customer ID
    async fn set_stripe_customer_id(&self, id: i32, customer_id: &str) -> DbResult<UserRow>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub preferences: Option<serde_json::Value>,
}

/// Partial user update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub verified: Option<bool>,
    pub preferences: Option<serde_json::Value>,
}

/// Contact-form repository trait
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Find a submission by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<ContactRow>>;

    /// List all submissions, newest first
    async fn list(&self) -> DbResult<Vec<ContactRow>>;

    /// Record a new submission
    async fn create(&self, contact: CreateContact) -> DbResult<ContactRow>;
}

/// Create contact input
#[derive(Debug, Clone)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
}

/// Client preview repository trait
#[async_trait]
pub trait ClientPreviewRepository: Send + Sync {
    /// Find a preview by code regardless of validity
    async fn find_by_code(&self, code: &str) -> DbResult<Option<ClientPreviewRow>>;

    /// Find a preview by code that is active and unexpired at `now`
    async fn find_valid_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> DbResult<Option<ClientPreviewRow>>;

    /// List every preview, newest first
    async fn list(&self) -> DbResult<Vec<ClientPreviewRow>>;

    /// Create a new preview; the code is caller-chosen
    async fn create(&self, preview: CreateClientPreview) -> DbResult<ClientPreviewRow>;

    /// Turn a preview off without deleting it
    async fn deactivate(&self, code: &str) -> DbResult<()>;

    /// Total number of preview rows
    async fn count(&self) -> DbResult<i64>;
}

/// Create client preview input
#[derive(Debug, Clone)]
pub struct CreateClientPreview {
    pub code: String,
    pub client_name: String,
    pub project_id: Option<i32>,
    pub expires_at: DateTime<Utc>,
}

/// Subscription plan repository trait
#[async_trait]
pub trait SubscriptionPlanRepository: Send + Sync {
    /// Find a plan by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<SubscriptionPlanRow>>;

    /// List every plan, cheapest first
    async fn list_all(&self) -> DbResult<Vec<SubscriptionPlanRow>>;

    /// List active plans, cheapest first
    async fn list_active(&self) -> DbResult<Vec<SubscriptionPlanRow>>;

    /// Create a new plan
    async fn create(&self, plan: CreateSubscriptionPlan) -> DbResult<SubscriptionPlanRow>;

    /// Merge the supplied fields into an existing plan
    async fn update(&self, id: i32, update: UpdateSubscriptionPlan)
        -> DbResult<SubscriptionPlanRow>;
}

/// Create subscription plan input
#[derive(Debug, Clone)]
pub struct CreateSubscriptionPlan {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub interval: String,
    pub features: Option<serde_json::Value>,
}

/// Partial subscription plan update
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionPlan {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub interval: Option<String>,
    pub features: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

/// User subscription repository trait
#[async_trait]
pub trait UserSubscriptionRepository: Send + Sync {
    /// Find a subscription by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<UserSubscriptionRow>>;

    /// Find the user's subscription that is `active` and unexpired at `now`
    async fn find_active_by_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> DbResult<Option<UserSubscriptionRow>>;

    /// List a user's subscriptions, newest first
    async fn list_by_user(&self, user_id: i32) -> DbResult<Vec<UserSubscriptionRow>>;

    /// Create a new subscription
    async fn create(&self, sub: CreateUserSubscription) -> DbResult<UserSubscriptionRow>;

    /// Update subscription status
    async fn update_status(&self, id: i32, status: &str) -> DbResult<UserSubscriptionRow>;

    /// Update the current billing period end
    async fn update_period_end(
        &self,
        id: i32,
        period_end: DateTime<Utc>,
    ) -> DbResult<UserSubscriptionRow>;
}

/// Create user subscription input
#[derive(Debug, Clone)]
pub struct CreateUserSubscription {
    pub user_id: i32,
    pub plan_id: i32,
    pub status: String,
    pub stripe_subscription_id: Option<String>,
    pub current_period_end: DateTime<Utc>,
}

/// Marketplace item repository trait
#[async_trait]
pub trait MarketplaceItemRepository: Send + Sync {
    /// Find an item by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<MarketplaceItemRow>>;

    /// List every item, newest first
    async fn list_all(&self) -> DbResult<Vec<MarketplaceItemRow>>;

    /// List available items, newest first
    async fn list_available(&self) -> DbResult<Vec<MarketplaceItemRow>>;

    /// Create a new item
    async fn create(&self, item: CreateMarketplaceItem) -> DbResult<MarketplaceItemRow>;

    /// Merge the supplied fields into an existing item
    async fn update(&self, id: i32, update: UpdateMarketplaceItem)
        -> DbResult<MarketplaceItemRow>;

    /// Case-insensitive substring search over name and description
    async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<MarketplaceItemRow>>;

    /// Same search restricted to `category = 'service'`
    async fn search_services(&self, query: &str, limit: i64)
        -> DbResult<Vec<MarketplaceItemRow>>;
}

/// Create marketplace item input
#[derive(Debug, Clone)]
pub struct CreateMarketplaceItem {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub seller_id: Option<i32>,
}

/// Partial marketplace item update
#[derive(Debug, Clone, Default)]
pub struct UpdateMarketplaceItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub is_available: Option<bool>,
}

/// Marketplace order repository trait
#[async_trait]
pub trait MarketplaceOrderRepository: Send + Sync {
    /// Find an order by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<MarketplaceOrderRow>>;

    /// List a buyer's orders, newest first
    async fn list_by_buyer(&self, buyer_id: i32) -> DbResult<Vec<MarketplaceOrderRow>>;

    /// Create a new order
    async fn create(&self, order: CreateMarketplaceOrder) -> DbResult<MarketplaceOrderRow>;

    /// Update order status; always bumps `updated_at`
    async fn update_status(&self, id: i32, status: &str) -> DbResult<MarketplaceOrderRow>;
}

/// Create marketplace order input
#[derive(Debug, Clone)]
pub struct CreateMarketplaceOrder {
    pub item_id: i32,
    pub buyer_id: i32,
    pub status: String,
    pub total: Decimal,
}

/// Advertisement repository trait
#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    /// Find an advertisement by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<AdvertisementRow>>;

    /// List every advertisement, newest first
    async fn list_all(&self) -> DbResult<Vec<AdvertisementRow>>;

    /// List advertisements whose flag is set and whose window contains `now`
    async fn list_active(&self, now: DateTime<Utc>) -> DbResult<Vec<AdvertisementRow>>;

    /// Create a new advertisement
    async fn create(&self, ad: CreateAdvertisement) -> DbResult<AdvertisementRow>;

    /// Merge the supplied fields into an existing advertisement
    async fn update(&self, id: i32, update: UpdateAdvertisement) -> DbResult<AdvertisementRow>;

    /// Atomically add one impression
    async fn increment_impressions(&self, id: i32) -> DbResult<()>;

    /// Atomically add one click
    async fn increment_clicks(&self, id: i32) -> DbResult<()>;
}

/// Create advertisement input
#[derive(Debug, Clone)]
pub struct CreateAdvertisement {
    pub title: String,
    pub image_url: Option<String>,
    pub target_url: Option<String>,
    pub placement: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Partial advertisement update
#[derive(Debug, Clone, Default)]
pub struct UpdateAdvertisement {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub target_url: Option<String>,
    pub placement: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// Feedback repository trait
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Find a feedback entry by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<FeedbackRow>>;

    /// List all feedback, newest first
    async fn list(&self) -> DbResult<Vec<FeedbackRow>>;

    /// List feedback with a given status, newest first
    async fn list_by_status(&self, status: &str) -> DbResult<Vec<FeedbackRow>>;

    /// Record a new feedback entry
    async fn create(&self, feedback: CreateFeedback) -> DbResult<FeedbackRow>;

    /// Update triage status; always bumps `updated_at`
    async fn update_status(&self, id: i32, status: &str) -> DbResult<FeedbackRow>;
}

/// Create feedback input
#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub user_id: Option<i32>,
    pub category: String,
    pub rating: Option<i32>,
    pub message: String,
}

/// Mockup request repository trait
#[async_trait]
pub trait MockupRequestRepository: Send + Sync {
    /// Find a request by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<MockupRequestRow>>;

    /// List a user's requests, newest first
    async fn list_by_user(&self, user_id: i32) -> DbResult<Vec<MockupRequestRow>>;

    /// List requests with a given status, newest first
    async fn list_by_status(&self, status: &str) -> DbResult<Vec<MockupRequestRow>>;

    /// List the most recent requests across all users
    async fn list_recent(&self, limit: i64) -> DbResult<Vec<MockupRequestRow>>;

    /// Create a new request
    async fn create(&self, request: CreateMockupRequest) -> DbResult<MockupRequestRow>;

    /// Update fulfilment status; always bumps `updated_at`
    async fn update_status(&self, id: i32, status: &str) -> DbResult<MockupRequestRow>;
}

/// Create mockup request input
#[derive(Debug, Clone)]
pub struct CreateMockupRequest {
    pub user_id: i32,
    pub business_type: String,
    pub requirements: Option<String>,
    pub status: String,
}

/// Price recommendation repository trait
#[async_trait]
pub trait PriceRecommendationRepository: Send + Sync {
    /// Find a recommendation by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<PriceRecommendationRow>>;

    /// List recommendations for a plan, newest first
    async fn list_by_plan(&self, plan_id: i32) -> DbResult<Vec<PriceRecommendationRow>>;

    /// Create a new recommendation
    async fn create(&self, rec: CreatePriceRecommendation) -> DbResult<PriceRecommendationRow>;

    /// Update review status; always bumps `updated_at`
    async fn update_status(&self, id: i32, status: &str) -> DbResult<PriceRecommendationRow>;
}

/// Create price recommendation input
#[derive(Debug, Clone)]
pub struct CreatePriceRecommendation {
    pub plan_id: i32,
    pub recommended_price: Decimal,
    pub reasoning: Option<String>,
}

/// Price history repository trait; history is append-only
#[async_trait]
pub trait PriceHistoryRepository: Send + Sync {
    /// Append a price change record
    async fn append(&self, entry: CreatePriceHistory) -> DbResult<PriceHistoryRow>;

    /// List a plan's price changes, newest first
    async fn list_by_plan(&self, plan_id: i32) -> DbResult<Vec<PriceHistoryRow>>;
}

/// Create price history input
#[derive(Debug, Clone)]
pub struct CreatePriceHistory {
    pub plan_id: i32,
    pub old_price: Decimal,
    pub new_price: Decimal,
}

/// User session repository trait (analytics)
#[async_trait]
pub trait UserSessionRepository: Send + Sync {
    /// Record a session
    async fn create(&self, session: CreateUserSession) -> DbResult<UserSessionRow>;

    /// List a user's sessions, most recent start first
    async fn list_by_user(&self, user_id: i32) -> DbResult<Vec<UserSessionRow>>;

    /// Total number of session rows
    async fn count(&self) -> DbResult<i64>;
}

/// Create user session input
#[derive(Debug, Clone)]
pub struct CreateUserSession {
    pub user_id: i32,
    pub session_start: DateTime<Utc>,
    pub duration_seconds: i32,
    pub device: String,
    pub browser: String,
    pub referrer: Option<String>,
}

/// Content view metric repository trait (analytics)
#[async_trait]
pub trait ContentMetricRepository: Send + Sync {
    /// Record a metrics row
    async fn create(&self, metric: CreateContentMetric) -> DbResult<ContentViewMetricRow>;

    /// Find the metrics row for a content key
    async fn find_by_content(&self, content_key: &str)
        -> DbResult<Option<ContentViewMetricRow>>;

    /// List every metrics row, most viewed first
    async fn list_all(&self) -> DbResult<Vec<ContentViewMetricRow>>;

    /// Total number of metric rows
    async fn count(&self) -> DbResult<i64>;
}

/// Create content metric input
#[derive(Debug, Clone)]
pub struct CreateContentMetric {
    pub content_key: String,
    pub content_type: String,
    pub views: i32,
    pub unique_views: i32,
    pub avg_time_on_page: f64,
    pub bounce_rate: f64,
    pub conversion_rate: f64,
}

/// Service engagement repository trait
///
/// Counters are upserted atomically: the first touch for a service inserts
/// the row with the counter at 1, later touches increment in place and
/// refresh `last_engaged_at`. Two concurrent first touches resolve as one
/// insert and one increment.
#[async_trait]
pub trait ServiceEngagementRepository: Send + Sync {
    /// Record a click against a service
    async fn track_click(&self, service_id: i32) -> DbResult<()>;

    /// Record an inquiry against a service
    async fn track_inquiry(&self, service_id: i32) -> DbResult<()>;

    /// Record a conversion against a service
    async fn track_conversion(&self, service_id: i32) -> DbResult<()>;

    /// Fetch the counters for a service
    async fn find_by_service(&self, service_id: i32)
        -> DbResult<Option<ServiceEngagementRow>>;

    /// List all engagement rows, most recently engaged first
    async fn list(&self) -> DbResult<Vec<ServiceEngagementRow>>;
}

/// Blog post repository trait
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Find a post by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<BlogPostRow>>;

    /// Find a post by slug
    async fn find_by_slug(&self, slug: &str) -> DbResult<Option<BlogPostRow>>;

    /// List published posts, newest first
    async fn list_published(&self) -> DbResult<Vec<BlogPostRow>>;

    /// Create a new post
    async fn create(&self, post: CreateBlogPost) -> DbResult<BlogPostRow>;

    /// Case-insensitive substring search over title, excerpt and content
    async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<BlogPostRow>>;
}

/// Create blog post input
#[derive(Debug, Clone)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub is_published: bool,
}
