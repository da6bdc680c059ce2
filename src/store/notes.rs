use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::model::Note;

/// Notes in creation order, keyed by a storage-assigned UUID
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: RwLock<Vec<Note>>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Vec<Note> {
        self.notes.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Note> {
        self.notes.read().iter().find(|n| n.id == id).cloned()
    }

    pub fn insert(&self, title: impl Into<String>, content: impl Into<String>) -> Note {
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
        };
        self.notes.write().push(note.clone());
        debug!(id = %note.id, "note inserted");
        note
    }

    /// Replace title and content wholesale; id and creation time are kept.
    pub fn replace(
        &self,
        id: &str,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<Note> {
        let mut notes = self.notes.write();
        let note = notes.iter_mut().find(|n| n.id == id)?;
        note.title = title.into();
        note.content = content.into();
        debug!(id, "note replaced");
        Some(note.clone())
    }

    pub fn remove(&self, id: &str) -> Option<Note> {
        let mut notes = self.notes.write();
        let index = notes.iter().position(|n| n.id == id)?;
        debug!(id, "note removed");
        Some(notes.remove(index))
    }
}
