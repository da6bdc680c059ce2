use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    http::{AppState, error::ApiError, extract::ValidJson},
    model::{DeletedTodo, NewTodo, TODO_DELETED, TODO_NOT_FOUND, Todo},
};

pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    Json(state.todos.list())
}

pub async fn create_todo(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = state.todos.insert(body.task, body.completed);
    info!(id = todo.id, "todo created");
    (StatusCode::CREATED, Json(todo))
}

/// Only a fully numeric id (surrounding whitespace aside) can match a record.
/// Anything else, including a numeric prefix such as `1abc`, is a 404 rather
/// than a 400.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedTodo>, ApiError> {
    let id: i64 = id
        .trim()
        .parse()
        .map_err(|_| ApiError::not_found(TODO_NOT_FOUND))?;

    let todo = state
        .todos
        .remove(id)
        .ok_or_else(|| ApiError::not_found(TODO_NOT_FOUND))?;
    info!(id, "todo deleted");

    Ok(Json(DeletedTodo {
        message: TODO_DELETED.to_string(),
        todo,
    }))
}
