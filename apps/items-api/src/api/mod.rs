//! API routes module
//!
//! Versioned routes are nested under `/api/v1` by `axum_helpers::create_router`;
//! service routes (welcome, health) stay at the root.

pub mod items;
pub mod root;

use axum::Router;
use axum_helpers::health_router;

use crate::config::Config;
use crate::storage::Storage;

/// Create all versioned API routes
pub fn routes(storage: &Storage, config: &Config) -> Router {
    Router::new().nest("/items", items::router(storage, config))
}

/// Routes mounted at the root: `/` and `/health`
pub fn service_routes(storage: &Storage, config: &Config) -> Router {
    let storage = storage.clone();
    let health = health_router(config.app, move || {
        let storage = storage.clone();
        Box::pin(async move { storage.ping().await.map_err(|e| e.to_string()) })
    });

    root::router(config.app).merge(health)
}
