//! Elevion Core - Store-agnostic platform services
//!
//! Services that sit on top of the `elevion-db` repository traits:
//! - [`search::SearchService`]: site-wide search with the
//!   availability-over-errors policy the UI relies on
//! - [`seed::SampleDataSeeder`]: idempotent demo-data bootstrap for
//!   development environments

pub mod search;
pub mod seed;

pub use search::SearchService;
pub use seed::{SampleDataSeeder, SeedReport};
