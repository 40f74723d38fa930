use std::sync::Arc;
use tracing::instrument;

use crate::error::{TodoError, TodoResult};
use crate::models::{PageRequest, Todo, TodoPage};
use crate::repository::TodoRepository;

/// Service layer for Todo use cases
///
/// Turns record absence into [`TodoError::NotFound`] and normalizes
/// pagination. Title content is validated by the caller.
pub struct TodoService<R: TodoRepository> {
    repository: Arc<R>,
}

// Clones share one repository; `R` itself need not be `Clone`.
impl<R: TodoRepository> Clone for TodoService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new todo
    #[instrument(skip(self, title))]
    pub async fn create_todo(&self, title: String) -> TodoResult<Todo> {
        Ok(self.repository.create(title).await?)
    }

    /// Get a todo by ID
    #[instrument(skip(self))]
    pub async fn get_todo(&self, id: i64) -> TodoResult<Todo> {
        self.repository
            .get(id)
            .await?
            .ok_or(TodoError::NotFound(id))
    }

    /// List one page of todos
    ///
    /// Out-of-range `page`/`page_size` values are normalized first; a page
    /// past the end is an empty result, not an error.
    #[instrument(skip(self))]
    pub async fn list_todos(&self, page: i64, page_size: i64) -> TodoResult<TodoPage> {
        let request = PageRequest::normalize(page, page_size);
        let (items, total) = self
            .repository
            .list(request.offset(), request.limit())
            .await?;

        Ok(TodoPage {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages: request.total_pages(total),
        })
    }

    /// Replace a todo's title and done flag
    #[instrument(skip(self, title))]
    pub async fn update_todo(&self, id: i64, title: String, is_done: bool) -> TodoResult<Todo> {
        self.repository
            .update(id, title, is_done)
            .await?
            .ok_or(TodoError::NotFound(id))
    }

    /// Delete a todo
    #[instrument(skip(self))]
    pub async fn delete_todo(&self, id: i64) -> TodoResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TodoError::NotFound(id));
        }

        Ok(())
    }

    /// Number of todos currently held
    pub async fn count_todos(&self) -> TodoResult<usize> {
        Ok(self.repository.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::repository::MockTodoRepository;
    use mockall::predicate::eq;

    fn todo(id: i64, title: &str) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            is_done: false,
        }
    }

    #[tokio::test]
    async fn test_get_missing_todo_is_not_found() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo
            .expect_get()
            .with(eq(7))
            .returning(|_| Ok(None));

        let service = TodoService::new(mock_repo);
        let result = service.get_todo(7).await;

        assert!(matches!(result, Err(TodoError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_list_normalizes_before_querying_store() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo
            .expect_list()
            .with(eq(0), eq(20))
            .times(1)
            .returning(|_, _| Ok((vec![todo(1, "a")], 41)));

        let service = TodoService::new(mock_repo);
        let page = service.list_todos(0, 1000).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.total, 41);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_passes_offset_for_later_pages() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo
            .expect_list()
            .with(eq(10), eq(5))
            .returning(|_, _| Ok((vec![], 3)));

        let service = TodoService::new(mock_repo);
        let page = service.list_todos(3, 5).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_update_missing_todo_is_not_found() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo
            .expect_update()
            .with(eq(999), eq("x".to_string()), eq(true))
            .returning(|_, _, _| Ok(None));

        let service = TodoService::new(mock_repo);
        let result = service.update_todo(999, "x".to_string(), true).await;

        assert!(matches!(result, Err(TodoError::NotFound(999))));
    }

    #[tokio::test]
    async fn test_delete_missing_todo_is_not_found() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo.expect_delete().with(eq(1)).returning(|_| Ok(false));

        let service = TodoService::new(mock_repo);
        let result = service.delete_todo(1).await;

        assert!(matches!(result, Err(TodoError::NotFound(1))));
    }

    #[tokio::test]
    async fn test_count_delegates_to_store() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo.expect_count().times(1).returning(|| Ok(3));

        let service = TodoService::new(mock_repo);

        assert_eq!(service.count_todos().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_mistaken_for_not_found() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo
            .expect_get()
            .returning(|_| Err(StoreError::Backend("connection reset".to_string())));
        mock_repo
            .expect_create()
            .returning(|_| Err(StoreError::SequenceExhausted));

        let service = TodoService::new(mock_repo);

        let get = service.get_todo(1).await;
        assert!(matches!(get, Err(TodoError::Storage(StoreError::Backend(_)))));

        let create = service.create_todo("a".to_string()).await;
        assert!(matches!(
            create,
            Err(TodoError::Storage(StoreError::SequenceExhausted))
        ));
    }
}
