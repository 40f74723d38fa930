use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Todos API",
        version = "0.1.0",
        description = "Create, list, update and delete todo items"
    ),
    servers(
        (url = "/v1", description = "API base path")
    ),
    nest(
        (path = domain_todos::handlers::BASE_PATH, api = domain_todos::ApiDoc)
    )
)]
pub struct ApiDoc;
