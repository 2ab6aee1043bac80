//! UI Components
//!
//! Reusable UI components for the desktop application.

mod delete_modal;
mod editor_pane;
mod note_card;
mod note_list;
mod toolbar;

pub use delete_modal::DeleteModal;
pub use editor_pane::EditorPane;
pub use note_card::NoteCard;
pub use note_list::NoteList;
pub use toolbar::Toolbar;
