//! PostgreSQL (sea-orm) implementation of ItemRepository

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use tracing::instrument;

use crate::entity;
use crate::models::{Item, ItemChanges, ItemFilter, ItemId, NewItem};
use crate::repository::{
    ItemQuery, ItemRepository, ItemSort, RepositoryError, RepositoryResult, parse_serial_id,
};

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        RepositoryError::Unavailable(err.to_string())
    }
}

pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &ItemFilter) -> Select<entity::Entity> {
        let mut select = entity::Entity::find();

        if let Some(status) = filter.status {
            select = select.filter(entity::Column::Status.eq(status));
        }

        select
    }

    fn listing(query: &ItemQuery) -> Select<entity::Entity> {
        let select = match query.sort {
            ItemSort::NewestFirst => Self::filtered(&query.filter)
                .order_by_desc(entity::Column::CreatedAt)
                .order_by_desc(entity::Column::Id),
        };

        select.limit(query.limit).offset(query.offset)
    }

    /// Active model with only the changed columns set
    fn changes_model(changes: ItemChanges) -> entity::ActiveModel {
        entity::ActiveModel {
            id: NotSet,
            name: changes.name.map_or(NotSet, Set),
            description: changes.description.map_or(NotSet, |d| Set(Some(d))),
            status: changes.status.map_or(NotSet, Set),
            created_at: NotSet,
            updated_at: Set(changes.updated_at.into()),
        }
    }

    fn key(id: &ItemId) -> Option<i64> {
        match id {
            ItemId::Serial(key) => Some(*key),
            ItemId::Opaque(_) => None,
        }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    fn parse_id(&self, raw: &str) -> RepositoryResult<ItemId> {
        parse_serial_id(raw)
    }

    #[instrument(skip(self))]
    async fn find(&self, query: ItemQuery) -> RepositoryResult<Vec<Item>> {
        let models = Self::listing(&query).all(&self.db).await?;
        Ok(models.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ItemFilter) -> RepositoryResult<u64> {
        let total = Self::filtered(&filter).count(&self.db).await?;
        Ok(total)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &ItemId) -> RepositoryResult<Option<Item>> {
        let Some(key) = Self::key(id) else {
            return Ok(None);
        };

        let model = entity::Entity::find_by_id(key).one(&self.db).await?;
        Ok(model.map(Item::from))
    }

    #[instrument(skip(self, item), fields(item_name = %item.name))]
    async fn insert(&self, item: NewItem) -> RepositoryResult<ItemId> {
        let active_model = entity::ActiveModel {
            id: NotSet,
            name: Set(item.name),
            description: Set(item.description),
            status: Set(item.status),
            created_at: Set(item.created_at.into()),
            updated_at: Set(item.updated_at.into()),
        };

        let result = entity::Entity::insert(active_model).exec(&self.db).await?;
        Ok(ItemId::Serial(result.last_insert_id))
    }

    #[instrument(skip(self, changes))]
    async fn update_by_id(&self, id: &ItemId, changes: ItemChanges) -> RepositoryResult<bool> {
        let Some(key) = Self::key(id) else {
            return Ok(false);
        };

        let result = entity::Entity::update_many()
            .set(Self::changes_model(changes))
            .filter(entity::Column::Id.eq(key))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &ItemId) -> RepositoryResult<bool> {
        let Some(key) = Self::key(id) else {
            return Ok(false);
        };

        let result = entity::Entity::delete_by_id(key).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemStatus, now_millis};
    use crate::pagination::PageRequest;
    use sea_orm::{DbBackend, QueryTrait};

    fn listing_sql(filter: ItemFilter, limit: u64, offset: u64) -> String {
        let query = ItemQuery {
            filter,
            sort: ItemSort::NewestFirst,
            limit,
            offset,
        };
        PgItemRepository::listing(&query)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_listing_orders_newest_first_and_pages() {
        let sql = listing_sql(ItemFilter::default(), 10, 20);

        assert!(sql.contains(r#"ORDER BY "items"."created_at" DESC, "items"."id" DESC"#), "{sql}");
        assert!(sql.contains("LIMIT 10 OFFSET 20"), "{sql}");
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn test_listing_offset_for_a_page_far_past_the_end_fits_bigint() {
        let page = PageRequest::from_query(Some("99999999999999999999"), None);
        let sql = listing_sql(ItemFilter::default(), page.limit, page.offset());

        assert!(sql.contains("LIMIT 10 OFFSET 9223372036854775807"), "{sql}");
    }

    #[test]
    fn test_listing_filters_by_status() {
        let sql = listing_sql(ItemFilter::with_status(ItemStatus::Inactive), 10, 0);

        assert!(sql.contains("WHERE"), "{sql}");
        assert!(sql.contains(r#""status""#), "{sql}");
        assert!(sql.contains("'inactive'"), "{sql}");
    }

    #[test]
    fn test_changes_model_sets_only_provided_columns() {
        let model = PgItemRepository::changes_model(ItemChanges {
            name: None,
            description: Some("x".to_string()),
            status: None,
            updated_at: now_millis(),
        });

        assert!(model.name.is_not_set());
        assert!(model.status.is_not_set());
        assert!(model.created_at.is_not_set());
        assert_eq!(model.description, Set(Some("x".to_string())));
        assert!(model.updated_at.is_set());
    }

    #[test]
    fn test_opaque_ids_never_match() {
        assert_eq!(PgItemRepository::key(&ItemId::Opaque("abc".into())), None);
        assert_eq!(PgItemRepository::key(&ItemId::Serial(3)), Some(3));
    }
}
