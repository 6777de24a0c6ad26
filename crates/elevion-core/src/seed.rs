//! Demo-data bootstrapper
//!
//! Populates preview codes and synthetic analytics rows the first time the
//! relevant tables are observed empty. Each step checks its own table's row
//! count and no-ops when anything already exists, so running the seeder
//! twice inserts nothing the second time.
//!
//! This is a development fixture invoked from setup code, not request
//! handlers. The count-then-insert gate is not safe against two processes
//! racing on an empty table.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use elevion_db::{
    ClientPreviewRepository, ContentMetricRepository, CreateClientPreview,
    CreateContentMetric, CreateUserSession, DbResult, UserRepository, UserSessionRepository,
};
use rand::Rng;

/// Demo preview codes: (code, client name)
const DEMO_PREVIEWS: &[(&str, &str)] = &[
    ("aurora-bakery", "Aurora Bakery"),
    ("harbor-fitness", "Harbor Fitness"),
    ("lumen-legal", "Lumen Legal Group"),
    ("pine-and-post", "Pine & Post Realty"),
];

/// How long a seeded preview stays valid
const PREVIEW_VALIDITY_DAYS: i64 = 30;

/// Catalog of content items that receive one synthetic metrics row each:
/// (content key, content type)
const CONTENT_CATALOG: &[(&str, &str)] = &[
    ("home", "page"),
    ("pricing", "page"),
    ("marketplace", "page"),
    ("blog/responsive-design-checklist", "post"),
    ("blog/why-site-speed-sells", "post"),
    ("blog/ecommerce-launch-guide", "post"),
    ("services/web-development", "service"),
    ("services/seo-audit", "service"),
];

const DEVICES: &[&str] = &["desktop", "mobile", "tablet"];
const BROWSERS: &[&str] = &["Chrome", "Firefox", "Safari", "Edge"];
const REFERRERS: &[&str] = &["google", "bing", "twitter", "linkedin", "newsletter"];

/// Sessions generated per user
const SESSIONS_PER_USER_MAX: u32 = 20;
/// Session start times fall inside this trailing window
const SESSION_WINDOW_DAYS: i64 = 30;

/// Rows inserted by a seeding run, per step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub previews: u64,
    pub sessions: u64,
    pub metrics: u64,
}

/// Idempotent demo-data seeder over the preview, user, and analytics
/// repositories
pub struct SampleDataSeeder<P, U, S, M>
where
    P: ClientPreviewRepository,
    U: UserRepository,
    S: UserSessionRepository,
    M: ContentMetricRepository,
{
    previews: Arc<P>,
    users: Arc<U>,
    sessions: Arc<S>,
    metrics: Arc<M>,
}

impl<P, U, S, M> SampleDataSeeder<P, U, S, M>
where
    P: ClientPreviewRepository,
    U: UserRepository,
    S: UserSessionRepository,
    M: ContentMetricRepository,
{
    /// Create a new seeder
    pub fn new(previews: Arc<P>, users: Arc<U>, sessions: Arc<S>, metrics: Arc<M>) -> Self {
        Self {
            previews,
            users,
            sessions,
            metrics,
        }
    }

    /// Run every seeding step, isolating failures per step.
    ///
    /// A failed step is logged and skipped; the run itself never errors, so
    /// startup code can call this unconditionally.
    pub async fn run(&self, now: DateTime<Utc>) -> SeedReport {
        let mut report = SeedReport::default();

        match self.seed_previews(now).await {
            Ok(n) => report.previews = n,
            Err(err) => tracing::warn!(error = %err, "preview seeding failed"),
        }

        match self.seed_sessions(now).await {
            Ok(n) => report.sessions = n,
            Err(err) => tracing::warn!(error = %err, "session seeding failed"),
        }

        match self.seed_metrics().await {
            Ok(n) => report.metrics = n,
            Err(err) => tracing::warn!(error = %err, "content metric seeding failed"),
        }

        tracing::info!(
            previews = report.previews,
            sessions = report.sessions,
            metrics = report.metrics,
            "sample data seeding finished"
        );

        report
    }

    /// Insert the demo preview codes if the table is empty
    pub async fn seed_previews(&self, now: DateTime<Utc>) -> DbResult<u64> {
        if self.previews.count().await? > 0 {
            return Ok(0);
        }

        let expires_at = now + Duration::days(PREVIEW_VALIDITY_DAYS);
        let mut inserted = 0;
        for (code, client_name) in DEMO_PREVIEWS {
            self.previews
                .create(CreateClientPreview {
                    code: (*code).to_string(),
                    client_name: (*client_name).to_string(),
                    project_id: None,
                    expires_at,
                })
                .await?;
            inserted += 1;
        }

        Ok(inserted)
    }

    /// Insert 1-20 randomized sessions per existing user if the table is empty
    pub async fn seed_sessions(&self, now: DateTime<Utc>) -> DbResult<u64> {
        if self.sessions.count().await? > 0 {
            return Ok(0);
        }

        let users = self.users.list_all().await?;
        let mut batch = Vec::new();
        {
            let mut rng = rand::rng();
            for user in &users {
                let count = rng.random_range(1..=SESSIONS_PER_USER_MAX);
                for _ in 0..count {
                    let minutes_ago =
                        rng.random_range(0..SESSION_WINDOW_DAYS * 24 * 60);
                    batch.push(CreateUserSession {
                        user_id: user.id,
                        session_start: now - Duration::minutes(minutes_ago),
                        duration_seconds: rng.random_range(30..=1800),
                        device: DEVICES[rng.random_range(0..DEVICES.len())].to_string(),
                        browser: BROWSERS[rng.random_range(0..BROWSERS.len())].to_string(),
                        referrer: if rng.random_bool(0.7) {
                            Some(REFERRERS[rng.random_range(0..REFERRERS.len())].to_string())
                        } else {
                            None
                        },
                    });
                }
            }
        }

        let inserted = batch.len() as u64;
        for session in batch {
            self.sessions.create(session).await?;
        }

        Ok(inserted)
    }

    /// Insert one randomized metrics row per catalog entry if the table is empty
    pub async fn seed_metrics(&self) -> DbResult<u64> {
        if self.metrics.count().await? > 0 {
            return Ok(0);
        }

        let mut batch = Vec::new();
        {
            let mut rng = rand::rng();
            for (content_key, content_type) in CONTENT_CATALOG {
                let views = rng.random_range(200..=5000);
                batch.push(CreateContentMetric {
                    content_key: (*content_key).to_string(),
                    content_type: (*content_type).to_string(),
                    views,
                    unique_views: rng.random_range(views / 4..=views),
                    avg_time_on_page: rng.random_range(20.0..=360.0),
                    bounce_rate: rng.random_range(0.2..=0.8),
                    conversion_rate: rng.random_range(0.005..=0.08),
                });
            }
        }

        let inserted = batch.len() as u64;
        for metric in batch {
            self.metrics.create(metric).await?;
        }

        Ok(inserted)
    }
}
