//! Per-request correlation ids.
//!
//! An incoming `x-request-id` is kept as-is; otherwise a UUID v4 is minted.
//! The id is recorded on the request span and echoed on the response.

use axum::{
    body::Body,
    http::{HeaderName, Request},
};
use tower::ServiceBuilder;
use tower::layer::util::{Identity, Stack};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::Span;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

type RequestIdLayers =
    Stack<PropagateRequestIdLayer, Stack<SetRequestIdLayer<MakeRequestUuid>, Identity>>;

/// Layers that assign and propagate the request id.
///
/// Apply these outside of the trace layer so the span can see the id.
pub fn request_id_layers() -> ServiceBuilder<RequestIdLayers> {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(header.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(header))
}

/// Span factory for `TraceLayer` that records method, uri and request id.
pub fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
