use core_config::{
    AppInfo, FromEnv, app_info, database::DatabaseBackend, env_parse_or_default,
    server::ServerConfig,
};
use database::mongodb::MongoConfig;
use database::postgres::PostgresConfig;
use domain_items::pagination::DEFAULT_MAX_PAGE_SIZE;

pub use core_config::Environment;

/// Connection settings for the selected storage backend
#[derive(Clone, Debug)]
pub enum StorageConfig {
    Mongo(MongoConfig),
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Load the settings of `backend` only; the other backend's variables are ignored
    pub fn from_env(backend: DatabaseBackend) -> eyre::Result<Self> {
        let config = match backend {
            DatabaseBackend::MongoDb => Self::Mongo(MongoConfig::from_env()?),
            DatabaseBackend::Postgres => Self::Postgres(PostgresConfig::from_env()?),
        };
        Ok(config)
    }

    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Mongo(_) => DatabaseBackend::MongoDb,
            Self::Postgres(_) => DatabaseBackend::Postgres,
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Largest `limit` a listing may use
    pub max_page_size: u64,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let storage = StorageConfig::from_env(DatabaseBackend::from_env()?)?;
        let max_page_size = env_parse_or_default("ITEMS_MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE)?;

        if max_page_size == 0 {
            eyre::bail!("ITEMS_MAX_PAGE_SIZE must be at least 1");
        }

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            storage,
            max_page_size,
        })
    }

    /// Storage error details are only put into responses outside production
    pub fn expose_internal_errors(&self) -> bool {
        self.environment.exposes_error_details()
    }
}
