//! Delete confirmation modal

use dioxus::prelude::*;

use crate::state::AppState;

/// Modal asking the user to confirm a pending note deletion. Nothing is
/// removed until the destructive action is confirmed here.
#[component]
pub fn DeleteModal() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let snapshot = (state.snapshot)();

    let Some(pending) = snapshot.pending_delete else {
        return rsx! {};
    };

    let title = snapshot
        .notes
        .iter()
        .find(|note| note.id == pending)
        .map_or_else(|| "this note".to_string(), |note| note.title_preview(40));

    let cancel = move |_| {
        state.with_controller(|controller| async move {
            controller.cancel_delete().await;
        });
    };

    let confirm = move |_| {
        state.with_controller(|controller| async move {
            if let Err(error) = controller.confirm_delete().await {
                tracing::error!("Failed to delete note: {error}");
            }
        });
    };

    rsx! {
        div {
            class: "modal-overlay",
            style: "
                position: fixed;
                inset: 0;
                display: flex;
                align-items: center;
                justify-content: center;
                background: rgba(0, 0, 0, 0.4);
            ",
            onclick: cancel,

            div {
                class: "modal",
                style: "
                    min-width: 320px;
                    max-width: 420px;
                    padding: 20px;
                    border-radius: 10px;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    box-shadow: 0 8px 32px rgba(0, 0, 0, 0.25);
                ",
                onclick: move |evt| evt.stop_propagation(),

                div {
                    style: "font-size: 16px; font-weight: 600; margin-bottom: 8px;",
                    "Delete note?"
                }

                div {
                    style: "font-size: 14px; color: {colors.text_muted}; margin-bottom: 16px;",
                    "\"{title}\" will be permanently deleted."
                }

                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",

                    button {
                        style: "
                            padding: 6px 12px;
                            border: 1px solid {colors.border};
                            border-radius: 6px;
                            cursor: pointer;
                            background: transparent;
                            color: {colors.text_primary};
                        ",
                        onclick: cancel,
                        "Cancel"
                    }

                    button {
                        style: "
                            padding: 6px 12px;
                            border: none;
                            border-radius: 6px;
                            cursor: pointer;
                            background: {colors.danger};
                            color: #ffffff;
                        ",
                        onclick: confirm,
                        "Delete"
                    }
                }
            }
        }
    }
}
