//! Note store construction for an authenticated session.

use plume_core::error::{StoreError, StoreResult};
use plume_core::models::AuthSession;
use plume_core::store::SupabaseNoteStore;

/// Build a note store bound to the session's access token.
///
/// A fresh store is constructed on every sign-in and dropped on sign-out,
/// so the bearer token never outlives its session.
pub fn note_store_for_session(session: &AuthSession) -> StoreResult<SupabaseNoteStore> {
    let url = std::env::var("SUPABASE_URL")
        .map_err(|_| StoreError::Unknown("SUPABASE_URL is not set".to_string()))?;
    let anon_key = std::env::var("SUPABASE_ANON_KEY")
        .map_err(|_| StoreError::Unknown("SUPABASE_ANON_KEY is not set".to_string()))?;

    SupabaseNoteStore::new(url, anon_key, session.access_token.clone())
}
