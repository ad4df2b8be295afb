use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Item, ItemChanges, ItemFilter, ItemId, NewItem};

/// Failures a storage adapter may report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The raw identifier does not have this backend's shape
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// The backend failed or could not be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Identifier shape of the relational backends: a positive base-10 `i64`
pub fn parse_serial_id(raw: &str) -> RepositoryResult<ItemId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RepositoryError::InvalidId(raw.to_string()));
    }

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(ItemId::Serial(id)),
        _ => Err(RepositoryError::InvalidId(raw.to_string())),
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemSort {
    /// `createdAt` descending, ties broken by id descending
    #[default]
    NewestFirst,
}

/// One paged listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemQuery {
    pub filter: ItemFilter,
    pub sort: ItemSort,
    pub limit: u64,
    pub offset: u64,
}

/// Repository trait for Item persistence
///
/// The service is written once against this trait; each storage backend
/// provides an implementation and converts its native errors into
/// [`RepositoryError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Check a raw path identifier against this backend's id shape
    fn parse_id(&self, raw: &str) -> RepositoryResult<ItemId>;

    /// Fetch one page of items
    async fn find(&self, query: ItemQuery) -> RepositoryResult<Vec<Item>>;

    /// Count items matching a filter
    async fn count(&self, filter: ItemFilter) -> RepositoryResult<u64>;

    /// Get an item by ID
    async fn find_by_id(&self, id: &ItemId) -> RepositoryResult<Option<Item>>;

    /// Insert a new item, returning its assigned id
    async fn insert(&self, item: NewItem) -> RepositoryResult<ItemId>;

    /// Apply a partial update; `false` when nothing matched
    async fn update_by_id(&self, id: &ItemId, changes: ItemChanges) -> RepositoryResult<bool>;

    /// Delete an item by ID; `false` when nothing matched
    async fn delete_by_id(&self, id: &ItemId) -> RepositoryResult<bool>;
}
