//! JSON extractor that validates the raw body before it becomes a typed payload.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde_json::Value;

/// A payload that can be built from an untyped JSON value.
///
/// Implementations report every problem they find, one message per
/// violation, rather than stopping at the first.
pub trait ValidatePayload: Sized {
    fn from_json(value: Value) -> Result<Self, Vec<String>>;
}

/// JSON extractor with validation.
///
/// The body is first parsed as a [`serde_json::Value`]; syntax errors and a
/// wrong content type are rejected as `Invalid JSON` with the status the
/// underlying [`Json`] extractor chose. The value is then handed to
/// [`ValidatePayload::from_json`] and any violations are returned as a 400
/// `Validation Error` listing them all.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::{ValidatePayload, ValidatedJson};
///
/// struct Rename(String);
///
/// impl ValidatePayload for Rename {
///     fn from_json(value: serde_json::Value) -> Result<Self, Vec<String>> {
///         match value.get("name").and_then(|v| v.as_str()) {
///             Some(name) => Ok(Rename(name.to_string())),
///             None => Err(vec!["\"name\" is required".to_string()]),
///         }
///     }
/// }
///
/// async fn rename(ValidatedJson(payload): ValidatedJson<Rename>) -> String {
///     payload.0
/// }
///
/// let app = Router::new().route("/rename", post(rename));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: ValidatePayload,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;

        T::from_json(value)
            .map(ValidatedJson)
            .map_err(AppError::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct Tag(String);

    impl ValidatePayload for Tag {
        fn from_json(value: Value) -> Result<Self, Vec<String>> {
            match value.get("tag") {
                Some(Value::String(tag)) => Ok(Tag(tag.clone())),
                Some(_) => Err(vec!["\"tag\" must be a string".to_string()]),
                None => Err(vec!["\"tag\" is required".to_string()]),
            }
        }
    }

    async fn echo(ValidatedJson(tag): ValidatedJson<Tag>) -> String {
        tag.0
    }

    async fn send(content_type: &str, body: &'static str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/tags", post(echo));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tags")
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_payload_reaches_handler() {
        let (status, body) = send("application/json", r#"{"tag":"blue"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"blue");
    }

    #[tokio::test]
    async fn test_violations_become_validation_error() {
        let (status, body) = send("application/json", r#"{"tag":7}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["details"][0], "\"tag\" must be a string");
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_json() {
        let (status, body) = send("application/json", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Invalid JSON");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_missing_content_type_keeps_rejection_status() {
        let (status, body) = send("text/plain", r#"{"tag":"blue"}"#).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Invalid JSON");
    }
}
