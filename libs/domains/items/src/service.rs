//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{
    CreateItem, Item, ItemChanges, ItemFilter, ItemId, NewItem, UpdateItem, next_updated_at,
    now_millis,
};
use crate::pagination::{DEFAULT_MAX_PAGE_SIZE, Page, PageRequest, Pagination};
use crate::repository::{ItemQuery, ItemRepository, ItemSort};

/// Item service providing business logic operations
///
/// Written once against [`ItemRepository`]; the backend is chosen by the
/// repository it is built with.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    max_page_size: u64,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Largest page a listing may return
    pub fn with_max_page_size(mut self, max_page_size: u64) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    pub fn max_page_size(&self) -> u64 {
        self.max_page_size
    }

    fn parse_id(&self, raw_id: &str) -> ItemResult<ItemId> {
        Ok(self.repository.parse_id(raw_id)?)
    }

    async fn load(&self, id: &ItemId) -> ItemResult<Item> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    /// List items, newest first
    #[instrument(skip(self))]
    pub async fn list_items(&self, filter: ItemFilter, page: PageRequest) -> ItemResult<Page<Item>> {
        let page = page.capped(self.max_page_size);
        let query = ItemQuery {
            filter,
            sort: ItemSort::NewestFirst,
            limit: page.limit,
            offset: page.offset(),
        };

        let (data, total) =
            tokio::try_join!(self.repository.find(query), self.repository.count(filter))?;

        Ok(Page {
            data,
            pagination: Pagination::new(page, total),
        })
    }

    /// Get an item by its raw path identifier
    #[instrument(skip(self))]
    pub async fn get_item(&self, raw_id: &str) -> ItemResult<Item> {
        let id = self.parse_id(raw_id)?;
        self.load(&id).await
    }

    /// Create a new item
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        let id = self
            .repository
            .insert(NewItem::new(input, now_millis()))
            .await?;

        tracing::info!(item_id = %id, "Item created successfully");

        self.repository.find_by_id(&id).await?.ok_or_else(|| {
            ItemError::StorageUnavailable(format!("Created item {} could not be read back", id))
        })
    }

    /// Update an existing item; absent fields are left unchanged
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, raw_id: &str, input: UpdateItem) -> ItemResult<Item> {
        let id = self.parse_id(raw_id)?;
        let existing = self.load(&id).await?;

        let changes = ItemChanges::new(input, next_updated_at(existing.updated_at));
        if !self.repository.update_by_id(&id, changes).await? {
            return Err(ItemError::NotFound(id.to_string()));
        }

        tracing::info!(item_id = %id, "Item updated successfully");
        self.load(&id).await
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, raw_id: &str) -> ItemResult<()> {
        let id = self.parse_id(raw_id)?;

        if !self.repository.delete_by_id(&id).await? {
            return Err(ItemError::NotFound(id.to_string()));
        }

        tracing::info!(item_id = %id, "Item deleted successfully");
        Ok(())
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            max_page_size: self.max_page_size,
        }
    }
}
