use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use super::health::ping;
use crate::common::{DatabaseResult, RetryConfig, retry_with_backoff};

/// Connect using a MongoConfig
///
/// The client is verified with a `ping` against the admin database before it
/// is returned, so a successful result means the server is reachable.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "items_api");
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Attempting to connect to MongoDB at {}", config.redacted_url());

    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.app_name = config.app_name.clone();

    let client = Client::with_options(options)?;
    ping(&client).await?;

    info!(database = %config.database, "Successfully connected to MongoDB");
    Ok(client)
}

/// Connect, retrying with backoff while the server is not reachable
///
/// # Example
/// ```ignore
/// use database::common::RetryConfig;
/// use database::mongodb::{MongoConfig, connect_from_config_with_retry};
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config_with_retry(&config, &RetryConfig::startup()).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry: &RetryConfig,
) -> DatabaseResult<Client> {
    retry_with_backoff("MongoDB", || connect_from_config(config), retry).await
}

/// Shut the client down, waiting for in-flight operations to finish
pub async fn close(client: Client) {
    info!("Closing MongoDB client");
    client.shutdown().await;
    info!("MongoDB client closed");
}
