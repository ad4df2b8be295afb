use crate::common::redact_url;

#[cfg(feature = "config")]
use core_config::{env_parse_or_default, ConfigError, FromEnv};

/// Default connection string used when no URL is configured
pub const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017";

/// Default database name
pub const DEFAULT_MONGODB_DATABASE: &str = "items_api";

/// MongoDB database configuration
///
/// This struct holds MongoDB connection settings.
/// It can be constructed manually or loaded from environment variables (with `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// // Manual construction
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "items");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URL
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a config for the given URL and database with default pool settings
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// The URL with any `user:password@` credentials masked, for logging
    pub fn redacted_url(&self) -> String {
        redact_url(&self.url)
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MONGODB_URL.to_string(),
            database: DEFAULT_MONGODB_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    /// Reads from environment variables:
    /// - MONGODB_URL (or MONGO_URL): defaults to mongodb://localhost:27017
    /// - MONGODB_DATABASE (or MONGO_DATABASE): defaults to items_api
    /// - MONGODB_APP_NAME: optional
    /// - MONGODB_MAX_POOL_SIZE / MONGODB_MIN_POOL_SIZE: 100 / 5
    /// - MONGODB_CONNECT_TIMEOUT_SECS / MONGODB_SERVER_SELECTION_TIMEOUT_SECS: 10 / 30
    fn from_env() -> Result<Self, ConfigError> {
        // Try MONGODB_URL first, fall back to MONGO_URL
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .unwrap_or_else(|_| DEFAULT_MONGODB_URL.to_string());

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| DEFAULT_MONGODB_DATABASE.to_string());

        let defaults = Self::default();

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or_default("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or_default("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or_default(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or_default(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_with_database() {
        let config = MongoConfig::with_database("mongodb://db:27017", "catalog");
        assert_eq!(config.url(), "mongodb://db:27017");
        assert_eq!(config.database(), "catalog");
        assert_eq!(config.max_pool_size, 100);
        assert!(config.app_name.is_none());
    }

    #[test]
    fn test_mongo_config_with_app_name() {
        let config = MongoConfig::default().with_app_name("items_api");
        assert_eq!(config.app_name.as_deref(), Some("items_api"));
    }

    #[test]
    fn test_mongo_config_redacted_url() {
        let config = MongoConfig::with_database("mongodb://admin:s3cret@db:27017/?tls=true", "x");
        assert_eq!(config.redacted_url(), "mongodb://***@db:27017/?tls=true");

        let plain = MongoConfig::default();
        assert_eq!(plain.redacted_url(), DEFAULT_MONGODB_URL);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None),
                ("MONGODB_DATABASE", None),
                ("MONGO_DATABASE", None),
                ("MONGODB_MAX_POOL_SIZE", None),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, DEFAULT_MONGODB_URL);
                assert_eq!(config.database, DEFAULT_MONGODB_DATABASE);
                assert_eq!(config.max_pool_size, 100);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_fallback_names() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", None),
                ("MONGO_DATABASE", Some("fallback_db")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://fallback:27017");
                assert_eq!(config.database, "fallback_db");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_invalid_pool_size() {
        temp_env::with_var("MONGODB_MAX_POOL_SIZE", Some("lots"), || {
            let err = MongoConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_MAX_POOL_SIZE"));
        });
    }
}
