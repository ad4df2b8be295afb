use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
};

use super::AppError;

/// Fallback handler for requests that match no route.
///
/// Responds 404 with `{"error": "Route not found", "message": "Cannot GET /path"}`.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    AppError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
    .into_response()
}
