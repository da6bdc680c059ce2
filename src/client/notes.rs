use std::time::Duration;

use async_trait::async_trait;

use crate::client::{ClientError, Endpoint, NoteApi};
use crate::model::{DeletedNote, Note, NoteInput};

/// Client for the notes backend, e.g. `http://localhost:4000/notes`
#[derive(Debug, Clone)]
pub struct NotesClient {
    endpoint: Endpoint,
}

impl NotesClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Endpoint::new(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl NoteApi for NotesClient {
    async fn list(&self) -> Result<Vec<Note>, ClientError> {
        let request = self.endpoint.http().get(self.endpoint.collection());
        self.endpoint.send(request).await
    }

    async fn create(&self, input: &NoteInput) -> Result<Note, ClientError> {
        let request = self
            .endpoint
            .http()
            .post(self.endpoint.collection())
            .json(input);
        self.endpoint.send(request).await
    }

    async fn update(&self, id: &str, input: &NoteInput) -> Result<Note, ClientError> {
        let request = self.endpoint.http().put(self.endpoint.item(id)).json(input);
        self.endpoint.send(request).await
    }

    async fn delete(&self, id: &str) -> Result<DeletedNote, ClientError> {
        let request = self.endpoint.http().delete(self.endpoint.item(id));
        self.endpoint.send(request).await
    }
}
