//! Welcome endpoint

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::API_PREFIX;
use core_config::AppInfo;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Endpoints {
    health: &'static str,
    api: &'static str,
}

#[derive(Debug, Serialize)]
struct WelcomeResponse {
    message: String,
    version: &'static str,
    description: &'static str,
    endpoints: Endpoints,
}

pub fn router(app: AppInfo) -> Router {
    Router::new().route("/", get(welcome)).with_state(app)
}

async fn welcome(State(app): State<AppInfo>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: format!("Welcome to {} API", app.name),
        version: app.version,
        description: app.description,
        endpoints: Endpoints {
            health: "/health",
            api: API_PREFIX,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_welcome_describes_the_service() {
        let app = AppInfo {
            name: "items_api",
            version: "0.1.0",
            description: "Items",
        };

        let response = router(app)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "message": "Welcome to items_api API",
                "version": "0.1.0",
                "description": "Items",
                "endpoints": {"health": "/health", "api": "/api/v1"}
            })
        );
    }
}
