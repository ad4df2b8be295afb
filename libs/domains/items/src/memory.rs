//! In-memory implementation of ItemRepository, for development and tests

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::models::{Item, ItemChanges, ItemFilter, ItemId, NewItem};
use crate::repository::{ItemQuery, ItemRepository, ItemSort, RepositoryResult, parse_serial_id};

#[derive(Default)]
struct Store {
    next_id: i64,
    items: BTreeMap<i64, Item>,
}

/// Items held in a map behind a lock, with sequential integer ids
///
/// Identifiers follow the relational backend: positive integers only.
#[derive(Default)]
pub struct InMemoryItemRepository {
    store: RwLock<Store>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(id: &ItemId) -> Option<i64> {
        match id {
            ItemId::Serial(key) => Some(*key),
            ItemId::Opaque(_) => None,
        }
    }
}

/// Newest first: `created_at` then id, both descending
fn newest_first(a: &Item, b: &Item) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| id_key(b).cmp(&id_key(a)))
}

fn id_key(item: &Item) -> i64 {
    match item.id {
        ItemId::Serial(key) => key,
        ItemId::Opaque(_) => 0,
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    fn parse_id(&self, raw: &str) -> RepositoryResult<ItemId> {
        parse_serial_id(raw)
    }

    #[instrument(skip(self))]
    async fn find(&self, query: ItemQuery) -> RepositoryResult<Vec<Item>> {
        let store = self.store.read().await;
        let mut items: Vec<Item> = store
            .items
            .values()
            .filter(|item| query.filter.matches(item))
            .cloned()
            .collect();

        match query.sort {
            ItemSort::NewestFirst => items.sort_by(newest_first),
        }

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(items.into_iter().skip(offset).take(limit).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ItemFilter) -> RepositoryResult<u64> {
        let store = self.store.read().await;
        Ok(store.items.values().filter(|item| filter.matches(item)).count() as u64)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &ItemId) -> RepositoryResult<Option<Item>> {
        let store = self.store.read().await;
        Ok(Self::key(id).and_then(|key| store.items.get(&key).cloned()))
    }

    #[instrument(skip(self, item), fields(item_name = %item.name))]
    async fn insert(&self, item: NewItem) -> RepositoryResult<ItemId> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let key = store.next_id;

        store.items.insert(
            key,
            Item {
                id: ItemId::Serial(key),
                name: item.name,
                description: item.description,
                status: item.status,
                created_at: item.created_at,
                updated_at: item.updated_at,
            },
        );

        Ok(ItemId::Serial(key))
    }

    #[instrument(skip(self, changes))]
    async fn update_by_id(&self, id: &ItemId, changes: ItemChanges) -> RepositoryResult<bool> {
        let Some(key) = Self::key(id) else {
            return Ok(false);
        };
        let mut store = self.store.write().await;
        let Some(item) = store.items.get_mut(&key) else {
            return Ok(false);
        };

        changes.apply_to(item);
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &ItemId) -> RepositoryResult<bool> {
        let mut store = self.store.write().await;
        Ok(Self::key(id)
            .and_then(|key| store.items.remove(&key))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemStatus, now_millis};
    use crate::repository::RepositoryError;
    use chrono::Duration;

    fn new_item(name: &str, status: ItemStatus, offset_ms: i64) -> NewItem {
        let at = now_millis() + Duration::milliseconds(offset_ms);
        NewItem {
            name: name.to_string(),
            description: None,
            status,
            created_at: at,
            updated_at: at,
        }
    }

    fn query(filter: ItemFilter, limit: u64, offset: u64) -> ItemQuery {
        ItemQuery {
            filter,
            sort: ItemSort::NewestFirst,
            limit,
            offset,
        }
    }

    #[test]
    fn test_parse_serial_id() {
        let repo = InMemoryItemRepository::new();
        assert_eq!(repo.parse_id("42").unwrap(), ItemId::Serial(42));
        for raw in ["0", "-1", "abc", "", "1.5", " 7", "+3", "99999999999999999999"] {
            assert_eq!(
                repo.parse_id(raw),
                Err(RepositoryError::InvalidId(raw.to_string())),
                "{raw:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryItemRepository::new();
        let first = repo.insert(new_item("a", ItemStatus::Active, 0)).await.unwrap();
        let second = repo.insert(new_item("b", ItemStatus::Active, 0)).await.unwrap();

        assert_eq!(first, ItemId::Serial(1));
        assert_eq!(second, ItemId::Serial(2));
        assert_eq!(repo.find_by_id(&second).await.unwrap().unwrap().name, "b");
    }

    #[tokio::test]
    async fn test_find_orders_newest_first_and_pages() {
        let repo = InMemoryItemRepository::new();
        repo.insert(new_item("old", ItemStatus::Active, -10)).await.unwrap();
        repo.insert(new_item("new", ItemStatus::Active, 10)).await.unwrap();
        repo.insert(new_item("mid", ItemStatus::Active, 0)).await.unwrap();

        let names: Vec<String> = repo
            .find(query(ItemFilter::default(), 10, 0))
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["new", "mid", "old"]);

        let page = repo.find(query(ItemFilter::default(), 1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "mid");
    }

    #[tokio::test]
    async fn test_equal_timestamps_break_ties_by_id() {
        let repo = InMemoryItemRepository::new();
        let item = new_item("same", ItemStatus::Active, 0);
        repo.insert(item.clone()).await.unwrap();
        repo.insert(item).await.unwrap();

        let items = repo.find(query(ItemFilter::default(), 10, 0)).await.unwrap();
        assert_eq!(items[0].id, ItemId::Serial(2));
        assert_eq!(items[1].id, ItemId::Serial(1));
    }

    #[tokio::test]
    async fn test_filter_applies_to_find_and_count() {
        let repo = InMemoryItemRepository::new();
        repo.insert(new_item("a", ItemStatus::Active, 0)).await.unwrap();
        repo.insert(new_item("b", ItemStatus::Inactive, 0)).await.unwrap();
        repo.insert(new_item("c", ItemStatus::Inactive, 0)).await.unwrap();

        let filter = ItemFilter::with_status(ItemStatus::Inactive);
        let items = repo.find(query(filter, 10, 0)).await.unwrap();
        assert!(items.iter().all(|item| item.status == ItemStatus::Inactive));
        assert_eq!(repo.count(filter).await.unwrap(), 2);
        assert_eq!(repo.count(ItemFilter::default()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_matches() {
        let repo = InMemoryItemRepository::new();
        let id = repo.insert(new_item("a", ItemStatus::Active, 0)).await.unwrap();
        let changes = ItemChanges {
            name: Some("renamed".to_string()),
            description: None,
            status: None,
            updated_at: now_millis() + Duration::seconds(1),
        };

        assert!(repo.update_by_id(&id, changes.clone()).await.unwrap());
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().name, "renamed");

        assert!(repo.delete_by_id(&id).await.unwrap());
        assert!(!repo.delete_by_id(&id).await.unwrap());
        assert!(!repo.update_by_id(&id, changes).await.unwrap());
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }
}
