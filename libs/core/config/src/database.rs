use crate::{env_or_default, ConfigError, FromEnv};
use std::fmt;
use std::str::FromStr;

/// Storage backend the service persists items to
///
/// Chosen once at startup; everything above the repository layer is
/// backend-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatabaseBackend {
    /// Document store (MongoDB)
    MongoDb,
    /// Relational store (PostgreSQL)
    Postgres,
}

impl DatabaseBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MongoDb => "mongodb",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(format!(
                "unknown backend '{}', expected one of: mongodb, postgres",
                other
            )),
        }
    }
}

impl FromEnv for DatabaseBackend {
    /// Reads DATABASE_BACKEND, defaulting to mongodb
    fn from_env() -> Result<Self, ConfigError> {
        env_or_default("DATABASE_BACKEND", "mongodb")
            .parse()
            .map_err(|details| ConfigError::ParseError {
                key: "DATABASE_BACKEND".to_string(),
                details,
            })
    }
}
