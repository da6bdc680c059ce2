use parking_lot::RwLock;
use tracing::debug;

use crate::model::Todo;

/// Ordered, process-lifetime list of to-dos
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the two demo records the service starts with.
    pub fn seeded() -> Self {
        Self::from_records(vec![
            Todo {
                id: 1,
                task: "Learn JavaScript".to_string(),
                completed: false,
            },
            Todo {
                id: 2,
                task: "Build a React app".to_string(),
                completed: false,
            },
        ])
    }

    pub fn from_records(todos: Vec<Todo>) -> Self {
        Self {
            todos: RwLock::new(todos),
        }
    }

    pub fn list(&self) -> Vec<Todo> {
        self.todos.read().clone()
    }

    /// Append a to-do, assigning `max(id) + 1`, or 1 for an empty list.
    pub fn insert(&self, task: impl Into<String>, completed: bool) -> Todo {
        let mut todos = self.todos.write();
        let todo = Todo {
            id: next_id(&todos),
            task: task.into(),
            completed,
        };
        todos.push(todo.clone());
        debug!(id = todo.id, "todo inserted");
        todo
    }

    /// Remove by id, keeping the order of the remaining records.
    pub fn remove(&self, id: i64) -> Option<Todo> {
        let mut todos = self.todos.write();
        let index = todos.iter().position(|t| t.id == id)?;
        let removed = todos.remove(index);
        debug!(id, "todo removed");
        Some(removed)
    }
}

fn next_id(todos: &[Todo]) -> i64 {
    todos.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_has_demo_records() {
        let store = TodoStore::seeded();
        let todos = store.list();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].task, "Learn JavaScript");
        assert_eq!(todos[1].task, "Build a React app");
        assert!(todos.iter().all(|t| !t.completed));
    }

    #[test]
    fn first_id_in_empty_store_is_one() {
        let store = TodoStore::new();
        assert!(store.list().is_empty());
        assert_eq!(store.insert("a", false).id, 1);
    }

    #[test]
    fn id_is_max_plus_one_not_len_plus_one() {
        let store = TodoStore::from_records(vec![
            Todo {
                id: 7,
                task: "x".into(),
                completed: false,
            },
            Todo {
                id: 3,
                task: "y".into(),
                completed: true,
            },
        ]);
        assert_eq!(store.insert("z", false).id, 8);
    }

    #[test]
    fn ids_are_reused_after_removing_the_maximum() {
        let store = TodoStore::seeded();
        assert_eq!(store.remove(2).map(|t| t.id), Some(2));
        assert_eq!(store.insert("again", false).id, 2);
    }

    #[test]
    fn remove_keeps_order_and_reports_missing() {
        let store = TodoStore::new();
        store.insert("a", false);
        store.insert("b", false);
        store.insert("c", true);

        assert!(store.remove(2).is_some());
        assert!(store.remove(2).is_none());

        let tasks: Vec<_> = store.list().into_iter().map(|t| t.task).collect();
        assert_eq!(tasks, ["a", "c"]);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn concurrent_inserts_get_distinct_ids() {
        let store = std::sync::Arc::new(TodoStore::new());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                std::thread::spawn(move || store.insert(format!("task {n}"), false).id)
            })
            .collect();

        let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }
}
