use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod storage;

use config::Config;
use storage::Storage;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!(
        backend = %config.storage.backend(),
        max_page_size = config.max_page_size,
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    // Connect with retry; a backend that never comes up aborts startup
    let storage = Storage::connect(&config.storage, config.app.name).await?;

    let api_routes = api::routes(&storage, &config);
    let service_routes = api::service_routes(&storage, &config);

    // Create a router with OpenAPI docs and the common middleware
    let app = create_router::<openapi::ApiDoc>(api_routes, service_routes).await?;

    info!("Starting Items API with production-ready shutdown (30s timeout)");

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        storage.close().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Items API shutdown complete");
    Ok(())
}
