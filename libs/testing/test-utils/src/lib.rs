//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the domain crates:
//! - `TestPostgres`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestMongo`: MongoDB container with a connected client (feature: "mongo")
//! - [`database_name`]: Deterministic per-test database names (always available)
//!
//! # Features
//!
//! - `postgres` (default): Enables PostgreSQL test infrastructure
//! - `mongo` (default): Enables MongoDB test infrastructure
//! - `all`: Enables all database test infrastructure
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestMongo, database_name};
//!
//! # async fn example() {
//! let mongo = TestMongo::new().await;
//! let db = mongo.database(&database_name("my_mongo_test"));
//! # }
//! ```
//!
//! Container tests need a Docker daemon; mark them
//! `#[ignore = "requires Docker"]` and run with `cargo test -- --ignored`.

#[cfg(feature = "mongo")]
mod mongo;
#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;
#[cfg(feature = "postgres")]
pub use postgres::TestPostgres;

/// Database name derived from a test name
///
/// Stable across runs and distinct per test, so tests sharing one server do
/// not see each other's data.
///
/// ```
/// use test_utils::database_name;
///
/// assert_eq!(database_name("test_create_item"), database_name("test_create_item"));
/// assert!(database_name("test_create_item").starts_with("test_"));
/// ```
pub fn database_name(test_name: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    test_name.hash(&mut hasher);
    // MongoDB limits database names to 64 bytes
    format!("test_{:x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name_is_deterministic_and_distinct() {
        assert_eq!(database_name("a"), database_name("a"));
        assert_ne!(database_name("a"), database_name("b"));
    }

    #[test]
    fn test_database_name_fits_mongodb_limit() {
        let name = database_name(&"x".repeat(500));
        assert!(name.len() < 64);
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}
