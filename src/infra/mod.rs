//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and entity definitions
//! - Schema migrations
//! - Request rate limiting

pub mod db;
pub mod entities;
pub mod rate_limit;

pub use db::{Database, Migrator};
pub use rate_limit::RateLimiter;
