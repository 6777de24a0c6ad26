//! Mock repositories for testing
//!
//! In-memory implementations of the gateway traits that honor the same
//! contracts as the Postgres ones: documented orderings, active windows
//! evaluated against the injected `now`, merge-style partial updates with
//! an `updated_at` bump, and atomic counter upserts.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use elevion_db::*;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

fn next(counter: &AtomicI32) -> i32 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

/// In-memory user repository
#[derive(Default)]
pub struct MockUserRepository {
    users: DashMap<i32, UserRow>,
    next_id: AtomicI32,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .users
            .iter()
            .find(|r| r.username == username)
            .map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .users
            .iter()
            .find(|r| r.email == email)
            .map(|r| r.value().clone()))
    }

    async fn list_all(&self) -> DbResult<Vec<UserRow>> {
        let mut users: Vec<_> = self.users.iter().map(|r| r.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        let now = Utc::now();
        let row = UserRow {
            id: next(&self.next_id),
            username: user.username,
            email: user.email,
            stripe_customer_id: None,
            verified: false,
            preferences: user.preferences,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, update: UpdateUser) -> DbResult<UserRow> {
        let mut user = self.users.get_mut(&id).ok_or(DbError::NotFound)?;
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(verified) = update.verified {
            user.verified = verified;
        }
        if let Some(preferences) = update.preferences {
            user.preferences = Some(preferences);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_stripe_customer_id(&self, id: i32, customer_id: &str) -> DbResult<UserRow> {
        let mut user = self.users.get_mut(&id).ok_or(DbError::NotFound)?;
        user.stripe_customer_id = Some(customer_id.to_string());
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

/// In-memory client preview repository
#[derive(Default)]
pub struct MockClientPreviewRepository {
    previews: DashMap<String, ClientPreviewRow>,
}

impl MockClientPreviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientPreviewRepository for MockClientPreviewRepository {
    async fn find_by_code(&self, code: &str) -> DbResult<Option<ClientPreviewRow>> {
        Ok(self.previews.get(code).map(|r| r.value().clone()))
    }

    async fn find_valid_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> DbResult<Option<ClientPreviewRow>> {
        Ok(self
            .previews
            .get(code)
            .filter(|r| r.is_active && r.expires_at > now)
            .map(|r| r.value().clone()))
    }

    async fn list(&self) -> DbResult<Vec<ClientPreviewRow>> {
        let mut previews: Vec<_> = self.previews.iter().map(|r| r.value().clone()).collect();
        previews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(previews)
    }

    async fn create(&self, preview: CreateClientPreview) -> DbResult<ClientPreviewRow> {
        let row = ClientPreviewRow {
            code: preview.code.clone(),
            client_name: preview.client_name,
            project_id: preview.project_id,
            expires_at: preview.expires_at,
            is_active: true,
            created_at: Utc::now(),
        };
        self.previews.insert(preview.code, row.clone());
        Ok(row)
    }

    async fn deactivate(&self, code: &str) -> DbResult<()> {
        if let Some(mut preview) = self.previews.get_mut(code) {
            preview.is_active = false;
        }
        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(self.previews.len() as i64)
    }
}

/// In-memory subscription plan repository
#[derive(Default)]
pub struct MockSubscriptionPlanRepository {
    plans: DashMap<i32, SubscriptionPlanRow>,
    next_id: AtomicI32,
}

impl MockSubscriptionPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionPlanRepository for MockSubscriptionPlanRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<SubscriptionPlanRow>> {
        Ok(self.plans.get(&id).map(|r| r.value().clone()))
    }

    async fn list_all(&self) -> DbResult<Vec<SubscriptionPlanRow>> {
        let mut plans: Vec<_> = self.plans.iter().map(|r| r.value().clone()).collect();
        plans.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(plans)
    }

    async fn list_active(&self) -> DbResult<Vec<SubscriptionPlanRow>> {
        let mut plans: Vec<_> = self
            .plans
            .iter()
            .filter(|r| r.is_active)
            .map(|r| r.value().clone())
            .collect();
        plans.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(plans)
    }

    async fn create(&self, plan: CreateSubscriptionPlan) -> DbResult<SubscriptionPlanRow> {
        let now = Utc::now();
        let row = SubscriptionPlanRow {
            id: next(&self.next_id),
            name: plan.name,
            description: plan.description,
            price: plan.price,
            interval: plan.interval,
            features: plan.features,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.plans.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        update: UpdateSubscriptionPlan,
    ) -> DbResult<SubscriptionPlanRow> {
        let mut plan = self.plans.get_mut(&id).ok_or(DbError::NotFound)?;
        if let Some(name) = update.name {
            plan.name = name;
        }
        if let Some(description) = update.description {
            plan.description = Some(description);
        }
        if let Some(price) = update.price {
            plan.price = price;
        }
        if let Some(interval) = update.interval {
            plan.interval = interval;
        }
        if let Some(features) = update.features {
            plan.features = Some(features);
        }
        if let Some(is_active) = update.is_active {
            plan.is_active = is_active;
        }
        plan.updated_at = Utc::now();
        Ok(plan.clone())
    }
}

/// In-memory user subscription repository
#[derive(Default)]
pub struct MockUserSubscriptionRepository {
    subs: DashMap<i32, UserSubscriptionRow>,
    next_id: AtomicI32,
}

impl MockUserSubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserSubscriptionRepository for MockUserSubscriptionRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<UserSubscriptionRow>> {
        Ok(self.subs.get(&id).map(|r| r.value().clone()))
    }

    async fn find_active_by_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> DbResult<Option<UserSubscriptionRow>> {
        let mut matching: Vec<_> = self
            .subs
            .iter()
            .filter(|r| {
                r.user_id == user_id && r.status == "active" && r.current_period_end > now
            })
            .map(|r| r.value().clone())
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching.into_iter().next())
    }

    async fn list_by_user(&self, user_id: i32) -> DbResult<Vec<UserSubscriptionRow>> {
        let mut subs: Vec<_> = self
            .subs
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.value().clone())
            .collect();
        subs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(subs)
    }

    async fn create(&self, sub: CreateUserSubscription) -> DbResult<UserSubscriptionRow> {
        let now = Utc::now();
        let row = UserSubscriptionRow {
            id: next(&self.next_id),
            user_id: sub.user_id,
            plan_id: sub.plan_id,
            status: sub.status,
            stripe_subscription_id: sub.stripe_subscription_id,
            current_period_end: sub.current_period_end,
            created_at: now,
            updated_at: now,
        };
        self.subs.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_status(&self, id: i32, status: &str) -> DbResult<UserSubscriptionRow> {
        let mut sub = self.subs.get_mut(&id).ok_or(DbError::NotFound)?;
        sub.status = status.to_string();
        sub.updated_at = Utc::now();
        Ok(sub.clone())
    }

    async fn update_period_end(
        &self,
        id: i32,
        period_end: DateTime<Utc>,
    ) -> DbResult<UserSubscriptionRow> {
        let mut sub = self.subs.get_mut(&id).ok_or(DbError::NotFound)?;
        sub.current_period_end = period_end;
        sub.updated_at = Utc::now();
        Ok(sub.clone())
    }
}

/// In-memory marketplace item repository
#[derive(Default)]
pub struct MockMarketplaceItemRepository {
    items: DashMap<i32, MarketplaceItemRow>,
    next_id: AtomicI32,
}

impl MockMarketplaceItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(item: &MarketplaceItemRow, query: &str) -> bool {
        let q = query.to_lowercase();
        item.name.to_lowercase().contains(&q) || item.description.to_lowercase().contains(&q)
    }

    fn sorted_desc(mut items: Vec<MarketplaceItemRow>) -> Vec<MarketplaceItemRow> {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }
}

#[async_trait]
impl MarketplaceItemRepository for MockMarketplaceItemRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<MarketplaceItemRow>> {
        Ok(self.items.get(&id).map(|r| r.value().clone()))
    }

    async fn list_all(&self) -> DbResult<Vec<MarketplaceItemRow>> {
        Ok(Self::sorted_desc(
            self.items.iter().map(|r| r.value().clone()).collect(),
        ))
    }

    async fn list_available(&self) -> DbResult<Vec<MarketplaceItemRow>> {
        Ok(Self::sorted_desc(
            self.items
                .iter()
                .filter(|r| r.is_available)
                .map(|r| r.value().clone())
                .collect(),
        ))
    }

    async fn create(&self, item: CreateMarketplaceItem) -> DbResult<MarketplaceItemRow> {
        let now = Utc::now();
        let row = MarketplaceItemRow {
            id: next(&self.next_id),
            name: item.name,
            description: item.description,
            category: item.category,
            price: item.price,
            seller_id: item.seller_id,
            is_available: true,
            created_at: now,
            updated_at: now,
        };
        self.items.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        update: UpdateMarketplaceItem,
    ) -> DbResult<MarketplaceItemRow> {
        let mut item = self.items.get_mut(&id).ok_or(DbError::NotFound)?;
        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(description) = update.description {
            item.description = description;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(price) = update.price {
            item.price = price;
        }
        if let Some(is_available) = update.is_available {
            item.is_available = is_available;
        }
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<MarketplaceItemRow>> {
        let matching = Self::sorted_desc(
            self.items
                .iter()
                .filter(|r| Self::matches(r.value(), query))
                .map(|r| r.value().clone())
                .collect(),
        );
        Ok(matching.into_iter().take(limit as usize).collect())
    }

    async fn search_services(
        &self,
        query: &str,
        limit: i64,
    ) -> DbResult<Vec<MarketplaceItemRow>> {
        let matching = Self::sorted_desc(
            self.items
                .iter()
                .filter(|r| r.category == SERVICE_CATEGORY && Self::matches(r.value(), query))
                .map(|r| r.value().clone())
                .collect(),
        );
        Ok(matching.into_iter().take(limit as usize).collect())
    }
}

/// In-memory marketplace order repository
#[derive(Default)]
pub struct MockMarketplaceOrderRepository {
    orders: DashMap<i32, MarketplaceOrderRow>,
    next_id: AtomicI32,
}

impl MockMarketplaceOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketplaceOrderRepository for MockMarketplaceOrderRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<MarketplaceOrderRow>> {
        Ok(self.orders.get(&id).map(|r| r.value().clone()))
    }

    async fn list_by_buyer(&self, buyer_id: i32) -> DbResult<Vec<MarketplaceOrderRow>> {
        let mut orders: Vec<_> = self
            .orders
            .iter()
            .filter(|r| r.buyer_id == buyer_id)
            .map(|r| r.value().clone())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn create(&self, order: CreateMarketplaceOrder) -> DbResult<MarketplaceOrderRow> {
        let now = Utc::now();
        let row = MarketplaceOrderRow {
            id: next(&self.next_id),
            item_id: order.item_id,
            buyer_id: order.buyer_id,
            status: order.status,
            total: order.total,
            created_at: now,
            updated_at: now,
        };
        self.orders.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_status(&self, id: i32, status: &str) -> DbResult<MarketplaceOrderRow> {
        let mut order = self.orders.get_mut(&id).ok_or(DbError::NotFound)?;
        order.status = status.to_string();
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}

/// In-memory advertisement repository
#[derive(Default)]
pub struct MockAdvertisementRepository {
    ads: DashMap<i32, AdvertisementRow>,
    next_id: AtomicI32,
}

impl MockAdvertisementRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdvertisementRepository for MockAdvertisementRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<AdvertisementRow>> {
        Ok(self.ads.get(&id).map(|r| r.value().clone()))
    }

    async fn list_all(&self) -> DbResult<Vec<AdvertisementRow>> {
        let mut ads: Vec<_> = self.ads.iter().map(|r| r.value().clone()).collect();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(ads)
    }

    async fn list_active(&self, now: DateTime<Utc>) -> DbResult<Vec<AdvertisementRow>> {
        let mut ads: Vec<_> = self
            .ads
            .iter()
            .filter(|r| r.is_active && r.start_date < now && r.end_date > now)
            .map(|r| r.value().clone())
            .collect();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(ads)
    }

    async fn create(&self, ad: CreateAdvertisement) -> DbResult<AdvertisementRow> {
        let now = Utc::now();
        let row = AdvertisementRow {
            id: next(&self.next_id),
            title: ad.title,
            image_url: ad.image_url,
            target_url: ad.target_url,
            placement: ad.placement,
            start_date: ad.start_date,
            end_date: ad.end_date,
            is_active: true,
            impressions: 0,
            clicks: 0,
            created_at: now,
            updated_at: now,
        };
        self.ads.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, update: UpdateAdvertisement) -> DbResult<AdvertisementRow> {
        let mut ad = self.ads.get_mut(&id).ok_or(DbError::NotFound)?;
        if let Some(title) = update.title {
            ad.title = title;
        }
        if let Some(image_url) = update.image_url {
            ad.image_url = Some(image_url);
        }
        if let Some(target_url) = update.target_url {
            ad.target_url = Some(target_url);
        }
        if let Some(placement) = update.placement {
            ad.placement = Some(placement);
        }
        if let Some(start_date) = update.start_date {
            ad.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            ad.end_date = end_date;
        }
        if let Some(is_active) = update.is_active {
            ad.is_active = is_active;
        }
        ad.updated_at = Utc::now();
        Ok(ad.clone())
    }

    async fn increment_impressions(&self, id: i32) -> DbResult<()> {
        // Exclusive entry lock stands in for the store-side atomic add.
        if let Some(mut ad) = self.ads.get_mut(&id) {
            ad.impressions += 1;
        }
        Ok(())
    }

    async fn increment_clicks(&self, id: i32) -> DbResult<()> {
        if let Some(mut ad) = self.ads.get_mut(&id) {
            ad.clicks += 1;
        }
        Ok(())
    }
}

/// In-memory user session repository
#[derive(Default)]
pub struct MockUserSessionRepository {
    sessions: Mutex<Vec<UserSessionRow>>,
    next_id: AtomicI32,
}

impl MockUserSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserSessionRepository for MockUserSessionRepository {
    async fn create(&self, session: CreateUserSession) -> DbResult<UserSessionRow> {
        let row = UserSessionRow {
            id: next(&self.next_id),
            user_id: session.user_id,
            session_start: session.session_start,
            duration_seconds: session.duration_seconds,
            device: session.device,
            browser: session.browser,
            referrer: session.referrer,
            created_at: Utc::now(),
        };
        self.sessions.lock().push(row.clone());
        Ok(row)
    }

    async fn list_by_user(&self, user_id: i32) -> DbResult<Vec<UserSessionRow>> {
        let mut sessions: Vec<_> = self
            .sessions
            .lock()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.session_start.cmp(&a.session_start));
        Ok(sessions)
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(self.sessions.lock().len() as i64)
    }
}

/// In-memory content metric repository
#[derive(Default)]
pub struct MockContentMetricRepository {
    metrics: Mutex<Vec<ContentViewMetricRow>>,
    next_id: AtomicI32,
}

impl MockContentMetricRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentMetricRepository for MockContentMetricRepository {
    async fn create(&self, metric: CreateContentMetric) -> DbResult<ContentViewMetricRow> {
        let row = ContentViewMetricRow {
            id: next(&self.next_id),
            content_key: metric.content_key,
            content_type: metric.content_type,
            views: metric.views,
            unique_views: metric.unique_views,
            avg_time_on_page: metric.avg_time_on_page,
            bounce_rate: metric.bounce_rate,
            conversion_rate: metric.conversion_rate,
            recorded_at: Utc::now(),
        };
        self.metrics.lock().push(row.clone());
        Ok(row)
    }

    async fn find_by_content(
        &self,
        content_key: &str,
    ) -> DbResult<Option<ContentViewMetricRow>> {
        Ok(self
            .metrics
            .lock()
            .iter()
            .find(|m| m.content_key == content_key)
            .cloned())
    }

    async fn list_all(&self) -> DbResult<Vec<ContentViewMetricRow>> {
        let mut metrics = self.metrics.lock().clone();
        metrics.sort_by(|a, b| b.views.cmp(&a.views));
        Ok(metrics)
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(self.metrics.lock().len() as i64)
    }
}

/// In-memory service engagement repository
#[derive(Default)]
pub struct MockServiceEngagementRepository {
    engagements: DashMap<i32, ServiceEngagementRow>,
}

impl MockServiceEngagementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn upsert(&self, service_id: i32, bump: impl Fn(&mut ServiceEngagementRow)) {
        // Entry lock makes insert-or-increment a single step, matching the
        // ON CONFLICT upsert in the Postgres implementation.
        let mut entry = self
            .engagements
            .entry(service_id)
            .or_insert_with(|| ServiceEngagementRow {
                service_id,
                clicks: 0,
                inquiries: 0,
                conversions: 0,
                last_engaged_at: Utc::now(),
            });
        bump(entry.value_mut());
        entry.last_engaged_at = Utc::now();
    }
}

#[async_trait]
impl ServiceEngagementRepository for MockServiceEngagementRepository {
    async fn track_click(&self, service_id: i32) -> DbResult<()> {
        self.upsert(service_id, |e| e.clicks += 1);
        Ok(())
    }

    async fn track_inquiry(&self, service_id: i32) -> DbResult<()> {
        self.upsert(service_id, |e| e.inquiries += 1);
        Ok(())
    }

    async fn track_conversion(&self, service_id: i32) -> DbResult<()> {
        self.upsert(service_id, |e| e.conversions += 1);
        Ok(())
    }

    async fn find_by_service(
        &self,
        service_id: i32,
    ) -> DbResult<Option<ServiceEngagementRow>> {
        Ok(self.engagements.get(&service_id).map(|r| r.value().clone()))
    }

    async fn list(&self) -> DbResult<Vec<ServiceEngagementRow>> {
        let mut engagements: Vec<_> =
            self.engagements.iter().map(|r| r.value().clone()).collect();
        engagements.sort_by(|a, b| b.last_engaged_at.cmp(&a.last_engaged_at));
        Ok(engagements)
    }
}

/// In-memory blog post repository
#[derive(Default)]
pub struct MockBlogPostRepository {
    posts: DashMap<i32, BlogPostRow>,
    next_id: AtomicI32,
}

impl MockBlogPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(post: &BlogPostRow, query: &str) -> bool {
        let q = query.to_lowercase();
        post.title.to_lowercase().contains(&q)
            || post
                .excerpt
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&q))
            || post.content.to_lowercase().contains(&q)
    }
}

#[async_trait]
impl BlogPostRepository for MockBlogPostRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<BlogPostRow>> {
        Ok(self.posts.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_slug(&self, slug: &str) -> DbResult<Option<BlogPostRow>> {
        Ok(self
            .posts
            .iter()
            .find(|r| r.slug == slug)
            .map(|r| r.value().clone()))
    }

    async fn list_published(&self) -> DbResult<Vec<BlogPostRow>> {
        let mut posts: Vec<_> = self
            .posts
            .iter()
            .filter(|r| r.is_published)
            .map(|r| r.value().clone())
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn create(&self, post: CreateBlogPost) -> DbResult<BlogPostRow> {
        let now = Utc::now();
        let row = BlogPostRow {
            id: next(&self.next_id),
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            category: post.category,
            is_published: post.is_published,
            created_at: now,
            updated_at: now,
        };
        self.posts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<BlogPostRow>> {
        let mut matching: Vec<_> = self
            .posts
            .iter()
            .filter(|r| Self::matches(r.value(), query))
            .map(|r| r.value().clone())
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matching.into_iter().take(limit as usize).collect())
    }
}

/// Blog repository whose every call fails, for exercising the search
/// swallow policy
pub struct FailingBlogPostRepository;

#[async_trait]
impl BlogPostRepository for FailingBlogPostRepository {
    async fn find_by_id(&self, _: i32) -> DbResult<Option<BlogPostRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn find_by_slug(&self, _: &str) -> DbResult<Option<BlogPostRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn list_published(&self) -> DbResult<Vec<BlogPostRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn create(&self, _: CreateBlogPost) -> DbResult<BlogPostRow> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn search(&self, _: &str, _: i64) -> DbResult<Vec<BlogPostRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }
}

/// Marketplace repository whose every call fails
pub struct FailingMarketplaceItemRepository;

#[async_trait]
impl MarketplaceItemRepository for FailingMarketplaceItemRepository {
    async fn find_by_id(&self, _: i32) -> DbResult<Option<MarketplaceItemRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn list_all(&self) -> DbResult<Vec<MarketplaceItemRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn list_available(&self) -> DbResult<Vec<MarketplaceItemRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn create(&self, _: CreateMarketplaceItem) -> DbResult<MarketplaceItemRow> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn update(&self, _: i32, _: UpdateMarketplaceItem) -> DbResult<MarketplaceItemRow> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn search(&self, _: &str, _: i64) -> DbResult<Vec<MarketplaceItemRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn search_services(&self, _: &str, _: i64) -> DbResult<Vec<MarketplaceItemRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }
}

/// Preview repository whose every call fails, for exercising seeder
/// step isolation
pub struct FailingClientPreviewRepository;

#[async_trait]
impl ClientPreviewRepository for FailingClientPreviewRepository {
    async fn find_by_code(&self, _: &str) -> DbResult<Option<ClientPreviewRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn find_valid_by_code(
        &self,
        _: &str,
        _: DateTime<Utc>,
    ) -> DbResult<Option<ClientPreviewRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn list(&self) -> DbResult<Vec<ClientPreviewRow>> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn create(&self, _: CreateClientPreview) -> DbResult<ClientPreviewRow> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn deactivate(&self, _: &str) -> DbResult<()> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn count(&self) -> DbResult<i64> {
        Err(DbError::Sqlx(sqlx::Error::PoolClosed))
    }
}

/// Convenience constructor used across tests
pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
