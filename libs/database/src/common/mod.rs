//! Common utilities shared across all database implementations

pub mod error;
pub mod redact;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use redact::redact_url;
pub use retry::{RetryConfig, retry_with_backoff};
