use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_todos::{InMemoryTodoRepository, TodoService};
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let todos = TodoService::new(InMemoryTodoRepository::new());

    let router = create_router::<openapi::ApiDoc>(
        api::routes(todos.clone()),
        config.app,
        config.server.request_timeout,
    );

    api::log_routes();
    info!(
        "Starting {} v{} ({:?})",
        config.app.name, config.app.version, config.environment
    );

    create_production_app(router, &config.server, async move {
        match todos.count_todos().await {
            Ok(count) => info!(todos = count, "Discarding in-memory todos"),
            Err(e) => tracing::error!("Could not count todos at shutdown: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Todos API shutdown complete");
    Ok(())
}
