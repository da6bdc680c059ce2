//! listkeep
//!
//! In-memory to-do and notes REST services, HTTP clients for them, and the
//! view state of the small front ends that drive them.

#![forbid(unsafe_code)]

pub mod client;
pub mod core;
pub mod http;
pub mod model;
pub mod store;
pub mod view;

pub use client::{ClientError, NoteApi, NotesClient, TodoApi, TodoClient};
pub use http::{AppState, build_router, notes_router, todos_router};
pub use model::{DeletedNote, DeletedTodo, ErrorBody, NewTodo, Note, NoteInput, Todo};
pub use store::{NoteStore, TodoStore};
pub use view::{NotesBoard, ProfileCard, TodoBoard};
