//! MongoDB database connector and utilities
//!
//! Provides connection management and MongoDB-specific helpers.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_MONGODB_DATABASE, DEFAULT_MONGODB_URL, MongoConfig};
pub use connector::{close, connect_from_config, connect_from_config_with_retry};
pub use health::check_health;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
