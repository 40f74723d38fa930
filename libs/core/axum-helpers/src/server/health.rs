use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const HEALTH_PATH: &str = "/healthz";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
    /// Local server time, `YYYY-MM-DD HH:MM:SS`
    pub time: String,
}

/// Liveness endpoint handler.
///
/// Always answers 200 while the process is serving requests.
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        name: app.name.to_string(),
        version: app.version.to_string(),
        time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Creates a router with the liveness endpoint.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = router.merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health_handler))
        .with_state(app_info)
}
