//! Todos Domain
//!
//! A small task-list domain: sequential ids, paginated listing and
//! not-found semantics over an in-process store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (axum)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← NotFound mapping, page normalization
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Id sequence + records behind one lock
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Todo, DTOs, TodoPage
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_todos::{
//!     handlers,
//!     repository::InMemoryTodoRepository,
//!     service::TodoService,
//! };
//!
//! let repository = InMemoryTodoRepository::new();
//! let service = TodoService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{StoreError, StoreResult, TodoError, TodoResult};
pub use handlers::ApiDoc;
pub use models::{CreateTodo, ListParams, PageRequest, Todo, TodoPage, UpdateTodo};
pub use repository::{InMemoryTodoRepository, TodoRepository};
pub use service::TodoService;
