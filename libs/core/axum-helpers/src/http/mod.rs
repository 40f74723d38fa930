//! HTTP middleware module.
//!
//! - Security headers
//! - Request correlation ids
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{request_id_layers, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(request_id_layers());
//! ```

pub mod request_id;
pub mod security;

pub use request_id::{REQUEST_ID_HEADER, request_id_layers, request_span};
pub use security::security_headers;
