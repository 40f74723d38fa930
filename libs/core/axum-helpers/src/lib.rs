//! # Axum Helpers
//!
//! Shared HTTP plumbing for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, liveness endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (security headers, request ids)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (integer id path, validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{app_info, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), app_info!(), config.request_timeout);
//!     create_production_app(router, &config, async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    API_PREFIX, HEALTH_PATH, HealthResponse, create_production_app, create_router, health_router,
    shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{REQUEST_ID_HEADER, request_id_layers, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};
