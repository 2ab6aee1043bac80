//! Note store adapter over the hosted document collection.
//!
//! The adapter is a thin query/mutation layer scoped per user; it never
//! retries. Retry policy, if any, belongs to the caller.

mod supabase;

use std::future::Future;

use crate::error::StoreResult;
use crate::models::{Note, NoteId, UserId};

pub use supabase::SupabaseNoteStore;

/// A note that has not been persisted yet. The store assigns the id and both
/// timestamps at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub owner_id: UserId,
}

/// Partial update for an existing note. `None` fields are omitted from the
/// write, not overwritten with defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteFields {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteFields {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Storage operations over the per-user note collection.
///
/// All operations are asynchronous and may fail transiently. Futures are
/// `Send` so the editor controller can run saves on spawned tasks.
pub trait NoteStore: Send + Sync {
    /// List all notes owned by `owner`, most recently modified first.
    fn list(&self, owner: &UserId) -> impl Future<Output = StoreResult<Vec<Note>>> + Send;

    /// Persist a new note and return it with its store-assigned id.
    fn create(&self, new: NewNote) -> impl Future<Output = StoreResult<Note>> + Send;

    /// Merge the given fields into an existing note. The store stamps
    /// `updated_at` with the write instant.
    fn update(&self, id: &NoteId, fields: NoteFields)
        -> impl Future<Output = StoreResult<Note>> + Send;

    /// Remove a note. Idempotent: deleting an absent id is not an error.
    fn delete(&self, id: &NoteId) -> impl Future<Output = StoreResult<()>> + Send;
}
