use axum_helpers::{AppError, REDACTED_MESSAGE};
use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Invalid item ID: {0}")]
    InvalidIdentifier(String),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<RepositoryError> for ItemError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidId(raw) => ItemError::InvalidIdentifier(raw),
            RepositoryError::Unavailable(detail) => ItemError::StorageUnavailable(detail),
        }
    }
}

/// The operation an error happened in; names the storage failure label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_label(&self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch items",
            Operation::Get => "Failed to fetch item",
            Operation::Create => "Failed to create item",
            Operation::Update => "Failed to update item",
            Operation::Delete => "Failed to delete item",
        }
    }
}

impl ItemError {
    /// Convert to the HTTP-facing error.
    ///
    /// Storage details reach the client only when `expose_details` is set;
    /// they are always logged.
    pub fn into_app_error(self, operation: Operation, expose_details: bool) -> AppError {
        match self {
            ItemError::Validation(violations) => AppError::Validation(violations),
            ItemError::InvalidIdentifier(_) => {
                AppError::InvalidIdentifier("Invalid item ID".to_string())
            }
            ItemError::NotFound(_) => AppError::NotFound("Item not found".to_string()),
            ItemError::StorageUnavailable(detail) => {
                tracing::error!(
                    operation = operation.failure_label(),
                    error = %detail,
                    "Storage operation failed"
                );
                let message = if expose_details {
                    detail
                } else {
                    REDACTED_MESSAGE.to_string()
                };
                AppError::Storage {
                    error: operation.failure_label().to_string(),
                    message,
                }
            }
        }
    }
}
