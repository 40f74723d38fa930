use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Failures raised by a [`TodoRepository`](crate::repository::TodoRepository)
/// implementation.
///
/// Absence of a record is not an error at this layer; it is reported as
/// `None` or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("todo id sequence exhausted")]
    SequenceExhausted,

    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("todo {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type TodoResult<T> = Result<T, TodoError>;

/// Convert TodoError to AppError for standardized error responses
impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(id) => AppError::NotFound(format!("todo {} not found", id)),
            TodoError::Storage(e) => AppError::BadRequest(e.to_string()),
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
