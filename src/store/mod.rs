//! In-process collections backing the two services.
//!
//! Each store keeps its records behind one lock, so id assignment and the
//! insert that follows it are a single critical section. Nothing survives a
//! restart.

mod notes;
mod todos;

pub use notes::NoteStore;
pub use todos::TodoStore;
