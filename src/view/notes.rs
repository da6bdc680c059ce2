use std::fmt::Write;

use chrono::Local;
use tracing::warn;

use crate::client::NoteApi;
use crate::model::{Note, NoteInput, TITLE_REQUIRED};

pub const FETCH_FAILED: &str = "Failed to fetch notes";
pub const ADD_FAILED: &str = "Failed to add note";
pub const UPDATE_FAILED: &str = "Failed to update note";
pub const DELETE_FAILED: &str = "Failed to delete note";

/// State of the notes manager: the fetched list plus an add/edit form.
pub struct NotesBoard<A> {
    api: A,
    notes: Vec<Note>,
    title: String,
    content: String,
    editing_id: Option<String>,
    error: Option<String>,
}

impl<A: NoteApi> NotesBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            notes: Vec::new(),
            title: String::new(),
            content: String::new(),
            editing_id: None,
            error: None,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing_id.is_some() {
            "Update Note"
        } else {
            "Add Note"
        }
    }

    pub async fn refresh(&mut self) {
        match self.api.list().await {
            Ok(notes) => self.notes = notes,
            Err(err) => {
                warn!(error = %err, "failed to fetch notes");
                self.error = Some(FETCH_FAILED.to_string());
            }
        }
    }

    /// Create a note, or update the one being edited, from the form.
    ///
    /// A blank title is rejected locally. On success the form is reset and
    /// the list refetched. Returns whether the write went through.
    pub async fn submit(&mut self) -> bool {
        if self.title.trim().is_empty() {
            self.error = Some(TITLE_REQUIRED.to_string());
            return false;
        }
        self.error = None;

        let input = NoteInput::new(self.title.clone(), self.content.clone());
        let result = match &self.editing_id {
            Some(id) => self
                .api
                .update(id, &input)
                .await
                .map_err(|err| (UPDATE_FAILED, err)),
            None => self
                .api
                .create(&input)
                .await
                .map_err(|err| (ADD_FAILED, err)),
        };

        match result {
            Ok(_) => {
                self.reset_form();
                self.refresh().await;
                true
            }
            Err((message, err)) => {
                warn!(error = %err, "{message}");
                self.error = Some(message.to_string());
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(_) => {
                self.refresh().await;
                true
            }
            Err(err) => {
                warn!(id, error = %err, "failed to delete note");
                self.error = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }

    /// Load a note into the form for editing.
    pub fn edit(&mut self, note: &Note) {
        self.title = note.title.clone();
        self.content = note.content.clone();
        self.editing_id = Some(note.id.clone());
    }

    pub fn reset_form(&mut self) {
        self.title.clear();
        self.content.clear();
        self.editing_id = None;
        self.error = None;
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Notes App\n");
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }
        for note in &self.notes {
            let created = note.created_at.with_timezone(&Local);
            let _ = writeln!(out, "\n{}  [{}]", note.title, note.id);
            if !note.content.is_empty() {
                let _ = writeln!(out, "{}", note.content);
            }
            let _ = writeln!(out, "{}", created.format("%Y-%m-%d %H:%M:%S"));
        }
        out
    }
}
