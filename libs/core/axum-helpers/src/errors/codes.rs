//! Type-safe error codes for API error logging.
//!
//! Every error response is logged with one of these codes. Each code has:
//! - String representation for log queries (e.g., "VALIDATION_ERROR")
//! - Integer code for monitoring and alerting (e.g., 1001)
//! - Default human-readable label
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Validation Error");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request payload failed validation
    ValidationError,

    /// Path identifier has the wrong shape for the active backend
    InvalidIdentifier,

    /// Request body is not valid JSON or has the wrong content type
    InvalidJson,

    /// Requested resource was not found
    NotFound,

    /// No route matches the request
    RouteNotFound,

    // Storage errors (2000-2999)
    /// The storage backend failed or could not be reached
    StorageUnavailable,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
        }
    }

    /// Returns the integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidIdentifier => 1002,
            Self::InvalidJson => 1003,
            Self::NotFound => 1004,
            Self::RouteNotFound => 1005,
            Self::StorageUnavailable => 2001,
        }
    }

    /// Returns the default label used as the `error` field of the response body.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Validation Error",
            Self::InvalidIdentifier => "Invalid identifier",
            Self::InvalidJson => "Invalid JSON",
            Self::NotFound => "Not found",
            Self::RouteNotFound => "Route not found",
            Self::StorageUnavailable => "Storage unavailable",
        }
    }

    /// Whether the code represents a server-side fault.
    pub fn is_server_error(&self) -> bool {
        self.code() >= 2000
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 6] = [
        ErrorCode::ValidationError,
        ErrorCode::InvalidIdentifier,
        ErrorCode::InvalidJson,
        ErrorCode::NotFound,
        ErrorCode::RouteNotFound,
        ErrorCode::StorageUnavailable,
    ];

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::InvalidIdentifier.as_str(), "INVALID_IDENTIFIER");
        assert_eq!(ErrorCode::StorageUnavailable.as_str(), "STORAGE_UNAVAILABLE");
    }

    #[test]
    fn test_error_codes_are_unique() {
        let codes: std::collections::HashSet<i32> = ALL.iter().map(ErrorCode::code).collect();
        assert_eq!(codes.len(), ALL.len());
    }

    #[test]
    fn test_error_code_serializes_like_as_str() {
        for code in ALL {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::json!(code.as_str()));
        }
    }

    #[test]
    fn test_server_error_classification() {
        assert!(ErrorCode::StorageUnavailable.is_server_error());
        assert!(!ErrorCode::ValidationError.is_server_error());
        assert!(!ErrorCode::RouteNotFound.is_server_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::InvalidJson.to_string(), "INVALID_JSON");
    }
}
