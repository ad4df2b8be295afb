use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use core_config::AppInfo;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

/// A boxed future for health checks with a string error
pub type HealthCheckFuture = Pin<Box<dyn Future<Output = Result<(), String>> + Send>>;

/// Body of `GET /health`
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"OK"` while the process is serving
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
    pub version: &'static str,
    /// Seconds since the health router was created
    pub uptime: f64,
    /// `"connected"` or `"disconnected"`, from a live probe
    pub database: &'static str,
}

#[derive(Clone)]
struct HealthState {
    app: AppInfo,
    started_at: Instant,
    probe: Arc<dyn Fn() -> HealthCheckFuture + Send + Sync>,
}

async fn health_handler(State(state): State<HealthState>) -> Json<HealthResponse> {
    let database = match (state.probe)().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Database health probe failed");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now(),
        service: state.app.name,
        version: state.app.version,
        uptime: state.started_at.elapsed().as_secs_f64(),
        database,
    })
}

/// Creates a router with the /health endpoint.
///
/// The endpoint always answers 200 while the process runs; the `database`
/// field reports the outcome of `probe`, which is awaited on every request.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let storage = storage.clone();
/// let app = Router::new().merge(health_router(app_info!(), move || {
///     let storage = storage.clone();
///     Box::pin(async move { storage.ping().await.map_err(|e| e.to_string()) })
/// }));
/// ```
pub fn health_router<P>(app_info: AppInfo, probe: P) -> Router
where
    P: Fn() -> HealthCheckFuture + Send + Sync + 'static,
{
    let state = HealthState {
        app: app_info,
        started_at: Instant::now(),
        probe: Arc::new(probe),
    };

    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}
