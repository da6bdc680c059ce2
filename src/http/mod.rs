//! REST surface of the to-do and notes services.
//!
//! The two services are independent routers sharing one [`AppState`]. They
//! can be bound to separate listeners (`todos_router`, `notes_router`) or
//! served together on one (`build_router`).

pub mod error;
pub mod extract;
pub mod notes;
pub mod todos;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::Html,
    routing::{delete, get, put},
};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    core::observability::{InMemoryMetrics, MetricsSnapshot, track_requests},
    store::{NoteStore, TodoStore},
    view::profile::ProfileCard,
};

pub use error::ApiError;
pub use extract::ValidJson;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<TodoStore>,
    pub notes: Arc<NoteStore>,
    pub metrics: Arc<InMemoryMetrics>,
    pub profile: Arc<ProfileCard>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TodoStore::seeded(), NoteStore::new(), ProfileCard::default())
    }
}

impl AppState {
    pub fn new(todos: TodoStore, notes: NoteStore, profile: ProfileCard) -> Self {
        Self {
            todos: Arc::new(todos),
            notes: Arc::new(notes),
            metrics: Arc::new(InMemoryMetrics::new()),
            profile: Arc::new(profile),
        }
    }
}

/// `/todos` plus the shared routes
pub fn todos_router(state: AppState) -> Router {
    finish(todo_routes().merge(common_routes()), state)
}

/// `/notes` plus the shared routes
pub fn notes_router(state: AppState) -> Router {
    finish(note_routes().merge(common_routes()), state)
}

/// Both services on a single router
pub fn build_router(state: AppState) -> Router {
    finish(
        todo_routes().merge(note_routes()).merge(common_routes()),
        state,
    )
}

fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route("/todos/{id}", delete(todos::delete_todo))
}

fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/{id}",
            put(notes::update_note).delete(notes::delete_note),
        )
}

fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/metrics", get(metrics_handler))
        .route("/profile", get(profile_handler))
}

fn finish(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_requests,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn healthz_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

async fn profile_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.profile.render_html())
}
