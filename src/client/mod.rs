//! HTTP clients for the two services.
//!
//! The view models only see the [`TodoApi`] and [`NoteApi`] traits, so they
//! can be driven by these clients or by any in-process implementation.

mod notes;
mod todos;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::model::{DeletedNote, DeletedTodo, ErrorBody, NewTodo, Note, NoteInput, Todo};

pub use notes::NotesClient;
pub use todos::TodoClient;

/// Message used when a failed response carries no error body
pub const NOT_OK: &str = "Network response was not ok";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or decoding failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The configured base URL cannot carry a path
    #[error("Invalid base URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The server answered with a non-2xx status
    #[error("{message} ({status})")]
    Status { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(err) => err.status(),
            Self::InvalidUrl { .. } => None,
            Self::Status { status, .. } => Some(*status),
        }
    }
}

#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;
    async fn create(&self, todo: &NewTodo) -> Result<Todo, ClientError>;
    async fn delete(&self, id: i64) -> Result<DeletedTodo, ClientError>;
}

#[async_trait]
pub trait NoteApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Note>, ClientError>;
    async fn create(&self, input: &NoteInput) -> Result<Note, ClientError>;
    async fn update(&self, id: &str, input: &NoteInput) -> Result<Note, ClientError>;
    async fn delete(&self, id: &str) -> Result<DeletedNote, ClientError>;
}

/// Collection endpoint plus the `reqwest` client used to reach it
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    http: reqwest::Client,
    base_url: Url,
}

impl Endpoint {
    pub(crate) fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let raw = base_url.into();
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: raw.clone(),
            reason,
        };

        let mut base_url = Url::parse(&raw).map_err(|err| invalid(err.to_string()))?;
        base_url
            .path_segments_mut()
            .map_err(|_| invalid("not a hierarchical URL".to_string()))?
            .pop_if_empty();

        let http = reqwest::Client::builder()
            .user_agent(format!("listkeep/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base_url })
    }

    pub(crate) fn collection(&self) -> Url {
        self.base_url.clone()
    }

    /// URL of one record. The id is a single percent-encoded path segment, so
    /// `?`, `#` and `/` in it never reach another resource.
    pub(crate) fn item(&self, id: impl std::fmt::Display) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects URLs that cannot carry path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send the request and decode a 2xx JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response received");

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| NOT_OK.to_string());
            return Err(ClientError::Status { status, message });
        }

        Ok(response.json::<T>().await?)
    }
}
