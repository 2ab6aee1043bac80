//! Services wiring the UI to the hosted backend

mod auth;
mod notes;

pub use auth::{auth_gate_from_env, AuthService, KeyringSessionStore};
pub use notes::note_store_for_session;
