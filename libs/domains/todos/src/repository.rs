use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::models::Todo;

/// Repository trait for Todo persistence
///
/// Implementations own id assignment. Absence is reported as `None` or
/// `false`; errors are reserved for storage failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Store a new, not-done todo under the next id
    async fn create(&self, title: String) -> StoreResult<Todo>;

    /// Get a todo by ID
    async fn get(&self, id: i64) -> StoreResult<Option<Todo>>;

    /// Up to `limit` todos starting at `offset` in ascending id order,
    /// plus the total number stored
    async fn list(&self, offset: usize, limit: usize) -> StoreResult<(Vec<Todo>, usize)>;

    /// Replace title and done flag in place
    async fn update(&self, id: i64, title: String, is_done: bool) -> StoreResult<Option<Todo>>;

    /// Delete a todo by ID
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Number of todos currently stored
    async fn count(&self) -> StoreResult<usize>;
}

#[derive(Debug, Default)]
struct TodoTable {
    last_id: i64,
    todos: BTreeMap<i64, Todo>,
}

impl TodoTable {
    fn next_id(&mut self) -> StoreResult<i64> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or(StoreError::SequenceExhausted)?;
        self.last_id = id;
        Ok(id)
    }
}

/// In-memory implementation of TodoRepository
///
/// The id counter and the records sit behind a single mutex, so every
/// operation observes and leaves a consistent table.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    table: Mutex<TodoTable>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, title: String) -> StoreResult<Todo> {
        let mut table = self.table.lock().await;

        let id = table.next_id()?;
        let todo = Todo {
            id,
            title,
            is_done: false,
        };
        table.todos.insert(id, todo.clone());

        tracing::info!(todo_id = id, "Created todo");
        Ok(todo)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Todo>> {
        let table = self.table.lock().await;
        Ok(table.todos.get(&id).cloned())
    }

    async fn list(&self, offset: usize, limit: usize) -> StoreResult<(Vec<Todo>, usize)> {
        let table = self.table.lock().await;

        let total = table.todos.len();
        let items = table
            .todos
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((items, total))
    }

    async fn update(&self, id: i64, title: String, is_done: bool) -> StoreResult<Option<Todo>> {
        let mut table = self.table.lock().await;

        let Some(todo) = table.todos.get_mut(&id) else {
            return Ok(None);
        };
        todo.title = title;
        todo.is_done = is_done;

        tracing::info!(todo_id = id, is_done, "Updated todo");
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut table = self.table.lock().await;

        let removed = table.todos.remove(&id).is_some();
        if removed {
            tracing::info!(todo_id = id, "Deleted todo");
        }
        Ok(removed)
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.table.lock().await.todos.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryTodoRepository::new();

        let first = repo.create("buy milk".to_string()).await.unwrap();
        let second = repo.create("walk dog".to_string()).await.unwrap();

        assert_eq!(
            first,
            Todo {
                id: 1,
                title: "buy milk".to_string(),
                is_done: false
            }
        );
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryTodoRepository::new();

        let first = repo.create("a".to_string()).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());

        let next = repo.create("b".to_string()).await.unwrap();
        assert_eq!(next.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let repo = InMemoryTodoRepository::new();
        assert_eq!(repo.get(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_leaves_store_untouched() {
        let repo = InMemoryTodoRepository::new();
        repo.create("keep".to_string()).await.unwrap();

        let updated = repo.update(999, "x".to_string(), true).await.unwrap();
        assert_eq!(updated, None);

        let (items, total) = repo.list(0, 10).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].title, "keep");
    }

    #[tokio::test]
    async fn test_list_returns_ascending_slice_and_total() {
        let repo = InMemoryTodoRepository::new();
        for title in ["a", "b", "c", "d"] {
            repo.create(title.to_string()).await.unwrap();
        }

        let (items, total) = repo.list(1, 2).await.unwrap();
        assert_eq!(total, 4);
        assert_eq!(items.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);

        let (past_end, total) = repo.list(10, 2).await.unwrap();
        assert!(past_end.is_empty());
        assert_eq!(total, 4);
    }

    #[tokio::test]
    async fn test_count_tracks_creates_and_deletes() {
        let repo = InMemoryTodoRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);

        let first = repo.create("a".to_string()).await.unwrap();
        repo.create("b".to_string()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);

        repo.delete(first.id).await.unwrap();
        repo.delete(first.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sequence_exhaustion_is_an_error() {
        let repo = InMemoryTodoRepository::new();
        repo.table.lock().await.last_id = i64::MAX;

        let result = repo.create("overflow".to_string()).await;
        assert_eq!(result, Err(StoreError::SequenceExhausted));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
