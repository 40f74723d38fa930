use axum::Router;
use axum_helpers::API_PREFIX;
use domain_todos::{InMemoryTodoRepository, TodoService, handlers};
use tracing::info;

pub type Todos = TodoService<InMemoryTodoRepository>;

/// Creates the API routes without the `/v1` prefix.
/// The prefix is added by the `create_router` helper.
pub fn routes(todos: Todos) -> Router {
    Router::new().nest(handlers::BASE_PATH, handlers::router(todos))
}

/// Logs every served route with its full path.
pub fn log_routes() {
    for (method, path) in handlers::ROUTES {
        let path = path.trim_end_matches('/');
        info!("{:<6} {}{}{}", method, API_PREFIX, handlers::BASE_PATH, path);
    }
}
