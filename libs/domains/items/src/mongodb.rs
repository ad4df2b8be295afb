//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc, oid::ObjectId},
    options::FindOptions,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::models::{Item, ItemChanges, ItemFilter, ItemId, ItemStatus, NewItem};
use crate::repository::{ItemQuery, ItemRepository, ItemSort, RepositoryError, RepositoryResult};

pub const COLLECTION_NAME: &str = "items";

/// Stored shape of an item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    status: ItemStatus,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_bson_datetime(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn from_bson_datetime(at: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or_default()
}

impl ItemDocument {
    fn into_item(self) -> Item {
        Item {
            id: ItemId::Opaque(self.id.to_hex()),
            name: self.name,
            description: self.description,
            status: self.status,
            created_at: from_bson_datetime(self.created_at),
            updated_at: from_bson_datetime(self.updated_at),
        }
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        RepositoryError::Unavailable(err.to_string())
    }
}

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository {
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    /// Create a new MongoItemRepository
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoItemRepository::new(client.database("items_api"));
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Create a new MongoItemRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<ItemDocument>(collection_name),
        }
    }

    /// Create the indexes listings rely on; safe to call on every start
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> RepositoryResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
            IndexModel::builder()
                .keys(doc! { "status": 1, "createdAt": -1 })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Item indexes ensured");
        Ok(())
    }

    /// Build a MongoDB filter document from ItemFilter
    fn build_filter(filter: &ItemFilter) -> Document {
        let mut doc = doc! {};

        if let Some(status) = filter.status {
            doc.insert("status", status.as_str());
        }

        doc
    }

    fn sort_document(sort: ItemSort) -> Document {
        match sort {
            ItemSort::NewestFirst => doc! { "createdAt": -1, "_id": -1 },
        }
    }

    fn find_options(query: &ItemQuery) -> FindOptions {
        FindOptions::builder()
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .skip(query.offset)
            .sort(Self::sort_document(query.sort))
            .build()
    }

    /// `$set` document touching only the provided fields
    fn build_update(changes: &ItemChanges) -> Document {
        let mut set = doc! { "updatedAt": to_bson_datetime(changes.updated_at) };

        if let Some(ref name) = changes.name {
            set.insert("name", name.as_str());
        }
        if let Some(ref description) = changes.description {
            set.insert("description", description.as_str());
        }
        if let Some(status) = changes.status {
            set.insert("status", status.as_str());
        }

        doc! { "$set": set }
    }

    fn id_filter(id: &ItemId) -> Option<Document> {
        match id {
            ItemId::Opaque(hex) => ObjectId::parse_str(hex).ok().map(|oid| doc! { "_id": oid }),
            ItemId::Serial(_) => None,
        }
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    fn parse_id(&self, raw: &str) -> RepositoryResult<ItemId> {
        parse_object_id(raw)
    }

    #[instrument(skip(self))]
    async fn find(&self, query: ItemQuery) -> RepositoryResult<Vec<Item>> {
        let cursor = self
            .collection
            .find(Self::build_filter(&query.filter))
            .with_options(Self::find_options(&query))
            .await?;
        let documents: Vec<ItemDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(ItemDocument::into_item).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ItemFilter) -> RepositoryResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &ItemId) -> RepositoryResult<Option<Item>> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(None);
        };

        let document = self.collection.find_one(filter).await?;
        Ok(document.map(ItemDocument::into_item))
    }

    #[instrument(skip(self, item), fields(item_name = %item.name))]
    async fn insert(&self, item: NewItem) -> RepositoryResult<ItemId> {
        let document = ItemDocument {
            id: ObjectId::new(),
            name: item.name,
            description: item.description,
            status: item.status,
            created_at: to_bson_datetime(item.created_at),
            updated_at: to_bson_datetime(item.updated_at),
        };

        self.collection.insert_one(&document).await?;
        Ok(ItemId::Opaque(document.id.to_hex()))
    }

    #[instrument(skip(self, changes))]
    async fn update_by_id(&self, id: &ItemId, changes: ItemChanges) -> RepositoryResult<bool> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(false);
        };

        let result = self
            .collection
            .update_one(filter, Self::build_update(&changes))
            .await?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &ItemId) -> RepositoryResult<bool> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count > 0)
    }
}

/// Accept 24-character hexadecimal ObjectIds only
fn parse_object_id(raw: &str) -> RepositoryResult<ItemId> {
    if raw.len() != 24 || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RepositoryError::InvalidId(raw.to_string()));
    }

    ObjectId::parse_str(raw)
        .map(|oid| ItemId::Opaque(oid.to_hex()))
        .map_err(|_| RepositoryError::InvalidId(raw.to_string()))
}
