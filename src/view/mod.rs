//! Front-end state for the three demo components.
//!
//! The boards hold exactly the state their UI counterparts keep (list,
//! form fields, loading flag, error text) and render it as plain text.

pub mod notes;
pub mod profile;
pub mod todos;

pub use notes::NotesBoard;
pub use profile::ProfileCard;
pub use todos::TodoBoard;
