//! Site-wide search façade
//!
//! Case-insensitive substring search over blog posts, marketplace items,
//! and services (items with `category = 'service'`). The UI calls these on
//! every keystroke and renders whatever comes back, so a store failure is
//! logged and reported as "no results" instead of propagating. Callers
//! cannot distinguish an empty result from a failed search; that is the
//! intended trade.

use std::sync::Arc;

use elevion_db::{BlogPostRepository, BlogPostRow, MarketplaceItemRepository, MarketplaceItemRow};

/// Maximum rows returned per search
pub const SEARCH_LIMIT: i64 = 15;

/// Search façade over the blog and marketplace repositories
pub struct SearchService<B: BlogPostRepository, M: MarketplaceItemRepository> {
    posts: Arc<B>,
    items: Arc<M>,
}

impl<B: BlogPostRepository, M: MarketplaceItemRepository> SearchService<B, M> {
    /// Create a new search service
    pub fn new(posts: Arc<B>, items: Arc<M>) -> Self {
        Self { posts, items }
    }

    /// Search blog posts by title, excerpt, or content
    pub async fn search_posts(&self, query: &str) -> Vec<BlogPostRow> {
        match self.posts.search(query, SEARCH_LIMIT).await {
            Ok(posts) => posts,
            Err(err) => {
                tracing::warn!(error = %err, query, "blog post search failed");
                Vec::new()
            }
        }
    }

    /// Search marketplace items by name or description
    pub async fn search_items(&self, query: &str) -> Vec<MarketplaceItemRow> {
        match self.items.search(query, SEARCH_LIMIT).await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, query, "marketplace search failed");
                Vec::new()
            }
        }
    }

    /// Search services: marketplace items restricted to the service category
    pub async fn search_services(&self, query: &str) -> Vec<MarketplaceItemRow> {
        match self.items.search_services(query, SEARCH_LIMIT).await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, query, "service search failed");
                Vec::new()
            }
        }
    }
}
