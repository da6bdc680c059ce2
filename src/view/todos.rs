use std::fmt::Write;

use tracing::warn;

use crate::client::TodoApi;
use crate::model::{NewTodo, Todo};

pub const LOADING: &str = "Loading todos...";
pub const EMPTY: &str = "No tasks yet. Add one above!";

/// State of the to-do manager.
///
/// Completion toggling is local to this value and never reaches the server.
pub struct TodoBoard<A> {
    api: A,
    todos: Vec<Todo>,
    loading: bool,
    error: Option<String>,
}

impl<A: TodoApi> TodoBoard<A> {
    /// A board that has not fetched yet, so it starts out loading.
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.api.list().await {
            Ok(todos) => self.todos = todos,
            Err(err) => {
                warn!(error = %err, "failed to fetch todos");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Create a to-do from trimmed input; blank input sends nothing.
    ///
    /// Returns whether a record was added.
    pub async fn add(&mut self, task: &str) -> bool {
        let task = task.trim();
        if task.is_empty() {
            return false;
        }

        match self.api.create(&NewTodo::new(task)).await {
            Ok(todo) => {
                self.todos.push(todo);
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to add todo");
                self.error = Some(format!("Failed to add todo: {err}"));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> bool {
        match self.api.delete(id).await {
            Ok(_) => {
                self.todos.retain(|t| t.id != id);
                true
            }
            Err(err) => {
                warn!(id, error = %err, "failed to delete todo");
                self.error = Some(format!("Failed to delete todo: {err}"));
                false
            }
        }
    }

    /// Flip `completed` locally. Returns false when no such to-do is shown.
    pub fn toggle(&mut self, id: i64) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                true
            }
            None => false,
        }
    }

    pub fn render(&self) -> String {
        if self.loading {
            return LOADING.to_string();
        }
        if let Some(error) = &self.error {
            return format!("Error: {error}");
        }

        let mut out = String::from("To-Do App\n");
        if self.todos.is_empty() {
            let _ = writeln!(out, "{EMPTY}");
        }
        for todo in &self.todos {
            let mark = if todo.completed { 'x' } else { ' ' };
            let _ = writeln!(out, "[{mark}] {:>3}  {}", todo.id, todo.task);
        }
        let _ = write!(out, "Total tasks: {}", self.todos.len());
        out
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reqwest::StatusCode;

    use super::*;
    use crate::client::ClientError;
    use crate::model::{DeletedTodo, TODO_DELETED, TODO_NOT_FOUND};
    use crate::store::TodoStore;

    /// In-process API over a real store, with a switch to make calls fail.
    #[derive(Default)]
    struct FakeApi {
        store: TodoStore,
        failing: Mutex<bool>,
        creates: Mutex<usize>,
    }

    impl FakeApi {
        fn seeded() -> Self {
            Self {
                store: TodoStore::seeded(),
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), ClientError> {
            if *self.failing.lock() {
                return Err(ClientError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<'a> TodoApi for &'a FakeApi {
        async fn list(&self) -> Result<Vec<Todo>, ClientError> {
            self.check()?;
            Ok(self.store.list())
        }

        async fn create(&self, todo: &NewTodo) -> Result<Todo, ClientError> {
            self.check()?;
            *self.creates.lock() += 1;
            Ok(self.store.insert(todo.task.clone(), todo.completed))
        }

        async fn delete(&self, id: i64) -> Result<DeletedTodo, ClientError> {
            self.check()?;
            let todo = self.store.remove(id).ok_or_else(|| ClientError::Status {
                status: StatusCode::NOT_FOUND,
                message: TODO_NOT_FOUND.to_string(),
            })?;
            Ok(DeletedTodo {
                message: TODO_DELETED.to_string(),
                todo,
            })
        }
    }

    #[tokio::test]
    async fn starts_loading_until_first_fetch() {
        let api = FakeApi::seeded();
        let mut board = TodoBoard::new(&api);
        assert!(board.is_loading());
        assert_eq!(board.render(), LOADING);

        board.refresh().await;
        assert!(!board.is_loading());
        assert_eq!(board.todos().len(), 2);
        assert!(board.render().ends_with("Total tasks: 2"));
    }

    #[tokio::test]
    async fn add_trims_and_skips_blank_input() {
        let api = FakeApi::default();
        let mut board = TodoBoard::new(&api);
        board.refresh().await;

        assert!(!board.add("   ").await);
        assert_eq!(*api.creates.lock(), 0);

        assert!(board.add("  water plants ").await);
        assert_eq!(board.todos()[0].task, "water plants");
        assert_eq!(board.todos()[0].id, 1);
    }

    #[tokio::test]
    async fn toggle_is_local_only() {
        let api = FakeApi::seeded();
        let mut board = TodoBoard::new(&api);
        board.refresh().await;

        assert!(board.toggle(1));
        assert!(board.todos()[0].completed);
        assert!(board.render().contains("[x]   1  Learn JavaScript"));
        assert!(!api.store.list()[0].completed);

        assert!(board.toggle(1));
        assert!(!board.todos()[0].completed);
        assert!(!board.toggle(42));
    }

    #[tokio::test]
    async fn delete_removes_locally_and_reports_missing() {
        let api = FakeApi::seeded();
        let mut board = TodoBoard::new(&api);
        board.refresh().await;

        assert!(board.delete(1).await);
        assert_eq!(board.todos().len(), 1);

        assert!(!board.delete(1).await);
        assert_eq!(
            board.error(),
            Some("Failed to delete todo: To-Do not found (404 Not Found)")
        );
        assert!(board.render().starts_with("Error: Failed to delete todo"));
    }

    #[tokio::test]
    async fn failures_surface_as_error_text() {
        let api = FakeApi::seeded();
        *api.failing.lock() = true;
        let mut board = TodoBoard::new(&api);

        board.refresh().await;
        assert!(!board.is_loading());
        assert_eq!(board.error(), Some("boom (500 Internal Server Error)"));

        assert!(!board.add("x").await);
        assert_eq!(
            board.error(),
            Some("Failed to add todo: boom (500 Internal Server Error)")
        );
    }

    #[tokio::test]
    async fn empty_list_message() {
        let api = FakeApi::default();
        let mut board = TodoBoard::new(&api);
        board.refresh().await;
        assert_eq!(board.render(), format!("To-Do App\n{EMPTY}\nTotal tasks: 0"));
    }
}
