pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Message sent in place of internal error details when they must not leak.
pub const REDACTED_MESSAGE: &str = "Something went wrong";

/// Standard error response structure.
///
/// Every error response carries this body:
/// - `error`: short human-readable label (e.g., "Item not found")
/// - `message`: optional longer explanation
/// - `details`: optional list of validation violations
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "Validation Error",
///   "details": ["\"name\" is required"]
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error label
    pub error: String,
    /// Longer explanation, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Validation violations, one message per problem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain layers translate their own errors into one of these variants;
/// the conversion to a response logs the matching [`ErrorCode`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Cannot {method} {path}")]
    RouteNotFound { method: Method, path: String },

    /// A storage backend failure; `error` names the failed operation
    #[error("{error}: {message}")]
    Storage { error: String, message: String },
}

impl AppError {
    /// The error code this variant is logged with.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::InvalidJson,
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::InvalidIdentifier(_) => ErrorCode::InvalidIdentifier,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::RouteNotFound { .. } => ErrorCode::RouteNotFound,
            AppError::Storage { .. } => ErrorCode::StorageUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.error_code();

        let (status, body) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = code.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (
                    e.status(),
                    ErrorResponse::new(code.default_message()).with_message(e.body_text()),
                )
            }
            AppError::Validation(details) => {
                tracing::info!(
                    error_code = code.code(),
                    violations = details.len(),
                    "Validation error: {:?}",
                    details
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(code.default_message()).with_details(details),
                )
            }
            AppError::InvalidIdentifier(msg) => {
                tracing::info!(error_code = code.code(), "Invalid identifier: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg))
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new(msg))
            }
            AppError::RouteNotFound { method, path } => {
                tracing::info!(error_code = code.code(), %method, %path, "Route not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(code.default_message())
                        .with_message(format!("Cannot {} {}", method, path)),
                )
            }
            // Logged by the caller, which still holds the unredacted detail
            AppError::Storage { error, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(error).with_message(message),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let (status, body) = render(AppError::Validation(vec![
            "\"name\" is required".to_string(),
            "\"color\" is not allowed".to_string(),
        ]))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "error": "Validation Error",
                "details": ["\"name\" is required", "\"color\" is not allowed"]
            })
        );
    }

    #[tokio::test]
    async fn test_not_found_body_has_only_error() {
        let (status, body) = render(AppError::NotFound("Item not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Item not found" }));
    }

    #[tokio::test]
    async fn test_invalid_identifier_is_bad_request() {
        let (status, body) =
            render(AppError::InvalidIdentifier("Invalid item ID".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid item ID" }));
    }

    #[tokio::test]
    async fn test_route_not_found_message() {
        let (status, body) = render(AppError::RouteNotFound {
            method: Method::PATCH,
            path: "/nowhere".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "error": "Route not found", "message": "Cannot PATCH /nowhere" })
        );
    }

    #[tokio::test]
    async fn test_storage_error_body() {
        let (status, body) = render(AppError::Storage {
            error: "Failed to fetch items".to_string(),
            message: REDACTED_MESSAGE.to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "Failed to fetch items", "message": "Something went wrong" })
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(vec![]).error_code(),
            ErrorCode::ValidationError
        );
        assert_eq!(
            AppError::Storage {
                error: String::new(),
                message: String::new()
            }
            .error_code(),
            ErrorCode::StorageUnavailable
        );
    }
}
