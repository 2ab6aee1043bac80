//! Data models shared across all Plume interfaces

pub mod note;
pub mod session;

pub use note::{Note, NoteId};
pub use session::{AuthSession, AuthUser, UserId};
