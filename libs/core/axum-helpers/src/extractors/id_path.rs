//! Integer path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for `i64` identifiers in the path.
///
/// Rejects with `400 INVALID_ID` when the segment is not a base-10 integer.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_todo(IdPath(id): IdPath) -> String {
///     format!("todo {}", id)
/// }
///
/// let app = Router::new().route("/todos/{id}", get(get_todo));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        raw.parse::<i64>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw).into_response())
    }
}
