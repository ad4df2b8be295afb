//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with OpenAPI documentation and common middleware
//! - The health endpoint
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let service_routes = health_router(app_info!(), probe);
//! let router = create_router::<ApiDoc>(api_routes, service_routes).await?;
//!
//! create_production_app(router, &config.server, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{API_PREFIX, MAX_BODY_BYTES, OPENAPI_JSON_PATH, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router};
pub use shutdown::ShutdownCoordinator;
