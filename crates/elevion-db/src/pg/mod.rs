//! PostgreSQL repository implementations

mod advertisement;
mod analytics;
mod blog;
mod contact;
mod feedback;
mod marketplace;
mod mockup;
mod plan;
mod preview;
mod subscription;
mod user;

pub use advertisement::PgAdvertisementRepository;
pub use analytics::{
    PgContentMetricRepository, PgServiceEngagementRepository, PgUserSessionRepository,
};
pub use blog::PgBlogPostRepository;
pub use contact::PgContactRepository;
pub use feedback::PgFeedbackRepository;
pub use marketplace::{PgMarketplaceItemRepository, PgMarketplaceOrderRepository};
pub use mockup::PgMockupRequestRepository;
pub use plan::{
    PgPriceHistoryRepository, PgPriceRecommendationRepository, PgSubscriptionPlanRepository,
};
pub use preview::PgClientPreviewRepository;
pub use subscription::PgUserSubscriptionRepository;
pub use user::PgUserRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub contacts: PgContactRepository,
    pub previews: PgClientPreviewRepository,
    pub plans: PgSubscriptionPlanRepository,
    pub subscriptions: PgUserSubscriptionRepository,
    pub items: PgMarketplaceItemRepository,
    pub orders: PgMarketplaceOrderRepository,
    pub ads: PgAdvertisementRepository,
    pub feedback: PgFeedbackRepository,
    pub mockups: PgMockupRequestRepository,
    pub recommendations: PgPriceRecommendationRepository,
    pub price_history: PgPriceHistoryRepository,
    pub sessions: PgUserSessionRepository,
    pub metrics: PgContentMetricRepository,
    pub engagements: PgServiceEngagementRepository,
    pub posts: PgBlogPostRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            contacts: PgContactRepository::new(pool.clone()),
            previews: PgClientPreviewRepository::new(pool.clone()),
            plans: PgSubscriptionPlanRepository::new(pool.clone()),
            subscriptions: PgUserSubscriptionRepository::new(pool.clone()),
            items: PgMarketplaceItemRepository::new(pool.clone()),
            orders: PgMarketplaceOrderRepository::new(pool.clone()),
            ads: PgAdvertisementRepository::new(pool.clone()),
            feedback: PgFeedbackRepository::new(pool.clone()),
            mockups: PgMockupRequestRepository::new(pool.clone()),
            recommendations: PgPriceRecommendationRepository::new(pool.clone()),
            price_history: PgPriceHistoryRepository::new(pool.clone()),
            sessions: PgUserSessionRepository::new(pool.clone()),
            metrics: PgContentMetricRepository::new(pool.clone()),
            engagements: PgServiceEngagementRepository::new(pool.clone()),
            posts: PgBlogPostRepository::new(pool),
        }
    }
}
