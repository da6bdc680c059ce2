use std::time::Duration;

use async_trait::async_trait;

use crate::client::{ClientError, Endpoint, TodoApi};
use crate::model::{DeletedTodo, NewTodo, Todo};

/// Client for the to-do backend, e.g. `http://localhost:3000/todos`
#[derive(Debug, Clone)]
pub struct TodoClient {
    endpoint: Endpoint,
}

impl TodoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Endpoint::new(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl TodoApi for TodoClient {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let request = self.endpoint.http().get(self.endpoint.collection());
        self.endpoint.send(request).await
    }

    async fn create(&self, todo: &NewTodo) -> Result<Todo, ClientError> {
        let request = self
            .endpoint
            .http()
            .post(self.endpoint.collection())
            .json(todo);
        self.endpoint.send(request).await
    }

    async fn delete(&self, id: i64) -> Result<DeletedTodo, ClientError> {
        let request = self.endpoint.http().delete(self.endpoint.item(id));
        self.endpoint.send(request).await
    }
}
