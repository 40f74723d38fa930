use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, BadRequestValidationResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TodoResult;
use crate::models::{CreateTodo, ListParams, Todo, TodoPage, UpdateTodo};
use crate::repository::TodoRepository;
use crate::service::TodoService;

const TAG: &str = "todos";

/// Path the todos router is nested under, relative to the API prefix
pub const BASE_PATH: &str = "/todos";

/// Method and path of every route served by [`router`], relative to
/// [`BASE_PATH`].
pub const ROUTES: &[(&str, &str)] = &[
    ("POST", "/"),
    ("GET", "/"),
    ("GET", "/{id}"),
    ("PUT", "/{id}"),
    ("DELETE", "/{id}"),
];

/// OpenAPI documentation for Todos API
#[derive(OpenApi)]
#[openapi(
    paths(list_todos, create_todo, get_todo, update_todo, delete_todo),
    components(
        schemas(Todo, CreateTodo, UpdateTodo, TodoPage),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            BadRequestResponse
        )
    ),
    tags(
        (name = TAG, description = "Todo management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the todo router with all HTTP endpoints
pub fn router<R: TodoRepository + 'static>(service: TodoService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(shared_service)
}

/// List todos one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListParams),
    responses(
        (status = 200, description = "One page of todos", body = TodoPage)
    )
)]
async fn list_todos<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    Query(params): Query<ListParams>,
) -> TodoResult<Json<TodoPage>> {
    let page = service.list_todos(params.page, params.page_size).await?;
    Ok(Json(page))
}

/// Create a new todo
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateTodo,
    responses(
        (status = 201, description = "Todo created successfully", body = Todo),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn create_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTodo>,
) -> TodoResult<impl IntoResponse> {
    let todo = service.create_todo(input.title).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo found", body = Todo),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    IdPath(id): IdPath,
) -> TodoResult<Json<Todo>> {
    let todo = service.get_todo(id).await?;
    Ok(Json(todo))
}

/// Update a todo
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    request_body = UpdateTodo,
    responses(
        (status = 200, description = "Todo updated successfully", body = Todo),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateTodo>,
) -> TodoResult<Json<Todo>> {
    let todo = service.update_todo(id, input.title, input.is_done).await?;
    Ok(Json(todo))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    responses(
        (status = 204, description = "Todo deleted successfully"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    IdPath(id): IdPath,
) -> TodoResult<impl IntoResponse> {
    service.delete_todo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
