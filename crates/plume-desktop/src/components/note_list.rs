//! Note list component

use dioxus::prelude::*;

use super::NoteCard;
use crate::state::AppState;

/// List of the user's notes, most recently modified first.
#[component]
pub fn NoteList() -> Element {
    let state = use_context::<AppState>();
    let snapshot = (state.snapshot)();
    let current_id = snapshot.selected();
    let colors = (state.theme)().palette();

    rsx! {
        div {
            class: "note-list",
            style: "
                width: 280px;
                border-right: 1px solid {colors.border};
                overflow-y: auto;
                background: {colors.bg_primary};
            ",

            if snapshot.notes.is_empty() {
                div {
                    style: "
                        padding: 20px;
                        text-align: center;
                        color: {colors.text_muted};
                    ",
                    "No notes yet"
                }
            } else {
                for note in snapshot.notes {
                    {
                        let note_id = note.id;
                        let is_selected = current_id == Some(note_id);
                        let title = note.title_preview(40);
                        let preview = note.content_preview(60);
                        let updated = note.updated_at;

                        rsx! {
                            NoteCard {
                                key: "{note_id}",
                                title,
                                preview,
                                updated,
                                is_selected,
                                onclick: move |_| {
                                    state.with_controller(move |controller| async move {
                                        controller.select(note_id).await;
                                    });
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
