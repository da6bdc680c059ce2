use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use listkeep::{AppState, NoteStore, ProfileCard, TodoStore, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    build_router(AppState::default())
}

fn empty_app() -> Router {
    build_router(AppState::new(
        TodoStore::new(),
        NoteStore::new(),
        ProfileCard::default(),
    ))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn send_raw(
    app: &Router,
    uri: &str,
    content_type: &str,
    body: &str,
) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_owned()))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

// ============================================================================
// Todos
// ============================================================================

#[tokio::test]
async fn get_todos_returns_seed_records() {
    let (status, body) = send(&app(), Method::GET, "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": 1, "task": "Learn JavaScript", "completed": false },
            { "id": 2, "task": "Build a React app", "completed": false }
        ])
    );
}

#[tokio::test]
async fn post_todo_assigns_max_plus_one() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/todos",
        Some(json!({ "task": "Write tests" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 3, "task": "Write tests", "completed": false }));

    let (_, list) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn post_todo_on_empty_list_gets_id_one_and_keeps_completed() {
    let (status, body) = send(
        &empty_app(),
        Method::POST,
        "/todos",
        Some(json!({ "task": "Ship", "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["completed"], true);
}

#[tokio::test]
async fn post_todo_without_task_is_400() {
    let app = app();
    for payload in [
        json!({}),
        json!({ "task": "" }),
        json!({ "completed": true }),
        json!({ "task": null }),
        json!({ "task": false }),
        json!({ "task": 0 }),
    ] {
        let (status, body) = send(&app, Method::POST, "/todos", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Task is required" }));
    }

    let (_, list) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn malformed_json_is_400_with_error_body() {
    let (status, body) = send_raw(&app(), "/todos", "application/json", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send_raw(&app(), "/todos", "text/plain", "task=x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn delete_todo_returns_message_and_record() {
    let app = app();
    let (status, body) = send(&app, Method::DELETE, "/todos/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "To-Do deleted",
            "todo": { "id": 1, "task": "Learn JavaScript", "completed": false }
        })
    );

    let (_, list) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(list[0]["id"], 2);
}

#[tokio::test]
async fn delete_unknown_todo_is_404() {
    let app = app();
    for uri in ["/todos/99", "/todos/abc", "/todos/1abc"] {
        let (status, body) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "To-Do not found" }));
    }

    let (_, list) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn deleting_the_max_lets_its_id_be_reused() {
    let app = app();
    send(&app, Method::DELETE, "/todos/2", None).await;
    let (_, body) = send(&app, Method::POST, "/todos", Some(json!({ "task": "again" }))).await;
    assert_eq!(body["id"], 2);
}

// ============================================================================
// Notes
// ============================================================================

#[tokio::test]
async fn note_lifecycle() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/notes",
        Some(json!({ "title": "Groceries", "content": "milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["title"], "Groceries");
    assert!(created["createdAt"].is_string());

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/notes/{id}"),
        Some(json!({ "title": "Shopping" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Shopping");
    assert_eq!(updated["content"], "");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (_, list) = send(&app, Method::GET, "/notes", None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let (status, deleted) = send(&app, Method::DELETE, &format!("/notes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Note deleted");
    assert_eq!(deleted["note"]["title"], "Shopping");

    let (_, list) = send(&app, Method::GET, "/notes", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn blank_note_title_is_400() {
    let app = app();
    for payload in [
        json!({}),
        json!({ "title": "  ", "content": "x" }),
        json!({ "title": null, "content": "x" }),
    ] {
        let (status, body) = send(&app, Method::POST, "/notes", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Title is required" }));
    }
}

#[tokio::test]
async fn unknown_note_is_404() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/notes/nope",
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Note not found" }));

    let (status, _) = send(&app, Method::DELETE, "/notes/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
