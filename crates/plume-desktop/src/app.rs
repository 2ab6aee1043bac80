//! Main application component

use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;

use plume_core::editor::EditorSnapshot;

use crate::services;
use crate::state::{AppState, NotesController};
use crate::theme;
use crate::views::{Home, Login};

/// Root application component
#[component]
pub fn App() -> Element {
    // State signals
    let mut auth = use_signal(|| None);
    let mut session = use_signal(|| None);
    let mut controller: Signal<Option<NotesController>> = use_signal(|| None);
    let mut snapshot = use_signal(EditorSnapshot::default);
    let mut auth_error = use_signal(|| None);
    let auth_notice = use_signal(|| None);
    let auth_busy = use_signal(|| false);
    let theme = use_signal(theme::detect);

    // Build the auth gate, restore any persisted session, then follow the
    // session subscription: it is the single source of truth for login state.
    use_future(move || async move {
        let gate = match services::auth_gate_from_env() {
            Ok(Some(gate)) => Arc::new(gate),
            Ok(None) => {
                auth_error.set(Some(
                    "Backend is not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY."
                        .to_string(),
                ));
                return;
            }
            Err(error) => {
                auth_error.set(Some(error.to_string()));
                return;
            }
        };
        auth.set(Some(Arc::clone(&gate)));

        if let Err(error) = gate.restore_session() {
            tracing::warn!("Failed to restore persisted session: {}", error);
        }

        let mut sessions = gate.subscribe();
        loop {
            let current = sessions.borrow_and_update().clone();
            session.set(current.clone());

            match current {
                Some(active) => match services::note_store_for_session(&active) {
                    Ok(store) => {
                        let notes_controller = NotesController::new(store);
                        match notes_controller.load_notes(active.user.id.clone()).await {
                            Ok(count) => tracing::info!("Loaded {} notes", count),
                            Err(error) => tracing::error!("Failed to load notes: {}", error),
                        }
                        snapshot.set(notes_controller.snapshot().await);
                        controller.set(Some(notes_controller));
                    }
                    Err(error) => {
                        tracing::error!("Failed to build note store: {}", error);
                    }
                },
                None => {
                    // Session ended: tear down all note and draft state.
                    let previous = controller();
                    if let Some(previous) = previous {
                        previous.clear().await;
                    }
                    controller.set(None);
                    snapshot.set(EditorSnapshot::default());
                }
            }

            if sessions.changed().await.is_err() {
                break;
            }
        }
    });

    // Re-snapshot when the controller changes in the background (debounced
    // autosaves finishing after the triggering event).
    use_future(move || async move {
        let mut last_seen = 0;
        loop {
            let current = controller();
            if let Some(current) = current {
                let count = current.change_count();
                if count != last_seen {
                    last_seen = count;
                    snapshot.set(current.snapshot().await);
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    use_context_provider(|| AppState {
        auth,
        session,
        controller,
        snapshot,
        auth_error,
        auth_notice,
        auth_busy,
        theme,
    });

    let colors = theme().palette();
    let signed_in = session().is_some();

    rsx! {
        div {
            class: "app-container",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",

            if signed_in {
                Home {}
            } else {
                Login {}
            }
        }
    }
}
