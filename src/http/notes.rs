use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    http::{AppState, error::ApiError, extract::ValidJson},
    model::{DeletedNote, NOTE_DELETED, NOTE_NOT_FOUND, Note, NoteInput},
};

pub async fn list_notes(State(state): State<AppState>) -> Json<Vec<Note>> {
    Json(state.notes.list())
}

pub async fn create_note(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NoteInput>,
) -> (StatusCode, Json<Note>) {
    let note = state.notes.insert(body.title, body.content);
    info!(id = %note.id, "note created");
    (StatusCode::CREATED, Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<NoteInput>,
) -> Result<Json<Note>, ApiError> {
    let note = state
        .notes
        .replace(&id, body.title, body.content)
        .ok_or_else(|| ApiError::not_found(NOTE_NOT_FOUND))?;
    info!(id = %note.id, "note updated");
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedNote>, ApiError> {
    let note = state
        .notes
        .remove(&id)
        .ok_or_else(|| ApiError::not_found(NOTE_NOT_FOUND))?;
    info!(id = %note.id, "note deleted");

    Ok(Json(DeletedNote {
        message: NOTE_DELETED.to_string(),
        note,
    }))
}
