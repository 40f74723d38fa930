use super::health::health_router;
use super::shutdown::{drain_deadline, signal_and_notify};
use crate::errors::handlers::not_found;
use crate::http::{request_id_layers, request_span, security_headers};
use axum::{Router, middleware};
use core_config::AppInfo;
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Prefix every versioned API route is nested under.
pub const API_PREFIX: &str = "/v1";

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI at `/swagger-ui`)
/// - The liveness endpoint (`/healthz`)
/// - API routes nested under `/v1`
/// - Request timeout, security headers, request tracing
/// - `x-request-id` correlation ids
/// - JSON 404 fallback
///
/// Domain routers apply their own state; this function only adds
/// cross-cutting concerns.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum_helpers::server::create_router;
/// use core_config::app_info;
///
/// let api_routes = Router::new().nest("/todos", todos_router);
/// let router = create_router::<ApiDoc>(api_routes, app_info!(), Duration::from_secs(10));
/// ```
pub fn create_router<T>(apis: Router, app_info: AppInfo, request_timeout: Duration) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_swagger_ui::SwaggerUi;

    // Deprecated in newer tower-http releases in favour of `with_status_code`.
    #[allow(deprecated)]
    let timeout_layer = TimeoutLayer::new(request_timeout);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(health_router(app_info))
        .nest(API_PREFIX, apis)
        .fallback(not_found)
        .layer(timeout_layer)
        .layer(middleware::from_fn(security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(request_id_layers())
}

/// Serves `router` until SIGINT/SIGTERM, then drains and runs `cleanup`.
///
/// After the signal, in-flight requests get `server_config.shutdown_timeout`
/// to finish; connections still open after that are dropped. `cleanup` runs
/// once the server has stopped and is bounded by the same timeout.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails while
/// serving.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config.server, async move {
///     info!("releasing resources");
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown_timeout = server_config.shutdown_timeout;
    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let server = async move {
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(signal_and_notify(signalled_tx))
            .await
    };

    let serve_result = tokio::select! {
        result = server => result.inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        }),
        () = drain_deadline(signalled_rx, shutdown_timeout) => {
            warn!(
                "Graceful shutdown exceeded {:?}, dropping remaining connections",
                shutdown_timeout
            );
            Ok(())
        }
    };

    info!("Running cleanup (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
