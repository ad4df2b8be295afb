//! Items endpoints bound to the configured backend

use axum::Router;
use domain_items::{ItemRepository, ItemService, MongoItemRepository, PgItemRepository, handlers};

use crate::config::Config;
use crate::storage::Storage;

/// Create the items router for whichever backend `storage` holds
pub fn router(storage: &Storage, config: &Config) -> Router {
    match storage {
        Storage::Mongo { db, .. } => bind(MongoItemRepository::new(db.clone()), config),
        Storage::Postgres(db) => bind(PgItemRepository::new(db.clone()), config),
    }
}

fn bind<R: ItemRepository + 'static>(repository: R, config: &Config) -> Router {
    let service = ItemService::new(repository).with_max_page_size(config.max_page_size);
    handlers::router(service, config.expose_internal_errors())
}
