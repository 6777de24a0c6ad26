//! Elevion DB - Persistence gateway
//!
//! SQLx-based data-access layer for the Elevion platform. One repository
//! per entity group; the repositories are the sole owners of database
//! access and never cache rows between calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use elevion_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/elevion").await?;
//! let repos = Repositories::new(pool);
//!
//! let plans = repos.plans.list_active().await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_with_options, DbPool, PoolOptions};
pub use repo::*;
