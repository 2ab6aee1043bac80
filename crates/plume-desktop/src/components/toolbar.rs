//! Toolbar component with note actions and sign-out

use dioxus::prelude::*;

use crate::state::AppState;

/// Toolbar with action buttons and the signed-in identity.
#[component]
pub fn Toolbar() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let snapshot = (state.snapshot)();
    let selected = snapshot.selected();
    let identity = state.signed_in_identity();

    let create_note = move |_| {
        state.with_controller(|controller| async move {
            match controller.create_note().await {
                Ok(id) => tracing::info!("Created new note: {id}"),
                Err(error) => tracing::error!("Failed to create note: {error}"),
            }
        });
    };

    let delete_note = move |_| {
        let Some(id) = selected else {
            return;
        };
        state.with_controller(move |controller| async move {
            controller.request_delete(id).await;
        });
    };

    let sign_out = move |_| {
        let Some(gate) = (state.auth)() else {
            return;
        };
        state.with_controller(|controller| async move {
            controller.clear().await;
        });
        spawn(async move {
            if let Err(error) = gate.sign_out().await {
                tracing::error!("Sign-out failed: {error}");
            }
        });
    };

    rsx! {
        div {
            class: "toolbar",
            style: "
                display: flex;
                align-items: center;
                gap: 8px;
                padding: 8px 12px;
                background: {colors.bg_secondary};
                border-bottom: 1px solid {colors.border};
            ",

            button {
                style: "
                    padding: 6px 12px;
                    border: none;
                    border-radius: 6px;
                    cursor: pointer;
                    background: {colors.accent};
                    color: {colors.accent_text};
                ",
                onclick: create_note,
                "+ New Note"
            }

            if selected.is_some() {
                button {
                    style: "
                        padding: 6px 12px;
                        border: none;
                        border-radius: 6px;
                        cursor: pointer;
                        background: {colors.danger};
                        color: #ffffff;
                    ",
                    onclick: delete_note,
                    "Delete"
                }
            }

            // Spacer
            div { style: "flex: 1;" }

            if let Some(identity) = identity {
                div {
                    style: "font-size: 13px; color: {colors.text_muted};",
                    "{identity}"
                }
            }

            button {
                style: "
                    padding: 6px 12px;
                    border: 1px solid {colors.border};
                    border-radius: 6px;
                    cursor: pointer;
                    background: transparent;
                    color: {colors.text_primary};
                ",
                onclick: sign_out,
                "Sign Out"
            }
        }
    }
}
