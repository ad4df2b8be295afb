/// Failures of the database helpers, shared by both backends
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A connection exists but the server did not answer a ping
    #[error("{backend} is unreachable: {reason}")]
    Unreachable {
        backend: &'static str,
        reason: String,
    },
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
