//! Application state management
//!
//! Global state accessible via Dioxus context providers. The editor
//! controller owns the note cache and draft; the UI keeps a rendered
//! snapshot of it plus auth/session signals.

use std::sync::Arc;

use dioxus::prelude::*;

use plume_core::editor::{EditorController, EditorSnapshot};
use plume_core::models::{AuthSession, Note};
use plume_core::store::SupabaseNoteStore;

use crate::services::AuthService;
use crate::theme::ResolvedTheme;

pub type NotesController = EditorController<SupabaseNoteStore>;

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Auth gate, if the backend is configured
    pub auth: Signal<Option<Arc<AuthService>>>,
    /// Active auth session, if signed in
    pub session: Signal<Option<AuthSession>>,
    /// Editor controller for the signed-in user
    pub controller: Signal<Option<NotesController>>,
    /// Rendered view of the controller state
    pub snapshot: Signal<EditorSnapshot>,
    /// Last auth error for UI display
    pub auth_error: Signal<Option<String>>,
    /// Informational auth message (e.g. confirmation email sent)
    pub auth_notice: Signal<Option<String>>,
    /// Whether an auth request is in flight
    pub auth_busy: Signal<bool>,
    /// Resolved theme
    pub theme: Signal<ResolvedTheme>,
}

impl AppState {
    /// Get the currently selected note from the snapshot cache
    #[must_use]
    pub fn selected_note(&self) -> Option<Note> {
        let snapshot = (self.snapshot)();
        let selected = snapshot.selected()?;
        snapshot.notes.into_iter().find(|note| note.id == selected)
    }

    /// Identity label for the signed-in user (email, falling back to id)
    #[must_use]
    pub fn signed_in_identity(&self) -> Option<String> {
        let session = (self.session)();
        session.map(|session| {
            session
                .user
                .email
                .unwrap_or_else(|| session.user.id.to_string())
        })
    }

    /// Run a controller action and re-snapshot when it finishes.
    pub fn with_controller<F, Fut>(&self, action: F)
    where
        F: FnOnce(NotesController) -> Fut + 'static,
        Fut: std::future::Future<Output = ()> + 'static,
    {
        let Some(controller) = (self.controller)() else {
            return;
        };
        let mut snapshot = self.snapshot;
        spawn(async move {
            action(controller.clone()).await;
            snapshot.set(controller.snapshot().await);
        });
    }
}
