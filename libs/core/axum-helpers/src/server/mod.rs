//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation and shared middleware
//! - The liveness endpoint
//! - Signal handling for graceful shutdown
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes, app_info!(), config.request_timeout);
//! create_production_app(router, &config, async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{API_PREFIX, create_production_app, create_router};
pub use health::{HEALTH_PATH, HealthResponse, health_router};
pub use shutdown::shutdown_signal;
