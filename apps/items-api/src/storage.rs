//! Connection handle for the selected backend
//!
//! Created once at startup and closed by the shutdown cleanup task.

use core_config::database::DatabaseBackend;
use database::DatabaseResult;
use database::common::RetryConfig;
use database::mongodb::{self as mongo, Client, Database};
use database::postgres::{self as pg, DatabaseConnection};
use domain_items::MongoItemRepository;
use tracing::info;

use crate::config::StorageConfig;

#[derive(Clone)]
pub enum Storage {
    Mongo { client: Client, db: Database },
    Postgres(DatabaseConnection),
}

impl Storage {
    /// Connect with startup retries and prepare the schema
    ///
    /// Mongo gets its listing indexes; Postgres runs the pending migrations.
    pub async fn connect(config: &StorageConfig, app_name: &str) -> eyre::Result<Self> {
        match config {
            StorageConfig::Mongo(mongo_config) => {
                info!("Connecting to MongoDB at {}", mongo_config.redacted_url());
                let client =
                    mongo::connect_from_config_with_retry(mongo_config, &RetryConfig::startup())
                        .await?;
                let db = client.database(mongo_config.database());

                MongoItemRepository::new(db.clone()).init_indexes().await?;
                info!(
                    "Successfully connected to MongoDB database: {}",
                    mongo_config.database()
                );

                Ok(Self::Mongo { client, db })
            }
            StorageConfig::Postgres(pg_config) => {
                info!("Connecting to PostgreSQL at {}", pg_config.redacted_url());
                let db =
                    pg::connect_from_config_with_retry(pg_config.clone(), &RetryConfig::startup())
                        .await?;

                pg::run_migrations::<migration::Migrator>(&db, app_name).await?;
                info!("Successfully connected to PostgreSQL");

                Ok(Self::Postgres(db))
            }
        }
    }

    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Mongo { .. } => DatabaseBackend::MongoDb,
            Self::Postgres(_) => DatabaseBackend::Postgres,
        }
    }

    /// Live round trip to the backend
    pub async fn ping(&self) -> DatabaseResult<()> {
        match self {
            Self::Mongo { client, .. } => mongo::check_health(client).await,
            Self::Postgres(db) => pg::check_health(db).await,
        }
    }

    pub async fn close(self) {
        info!("Shutting down: closing {} connections", self.backend());
        match self {
            Self::Mongo { client, .. } => mongo::close(client).await,
            Self::Postgres(db) => pg::close(db).await,
        }
    }
}
