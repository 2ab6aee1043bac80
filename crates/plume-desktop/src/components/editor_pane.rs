//! Editor pane component
//!
//! Binds the draft to a title input and a content area. The content widget
//! is treated as an opaque surface: initial markup in, change events out,
//! disabled when nothing is selected.

use dioxus::prelude::*;

use plume_core::editor::{DraftField, DraftState};
use plume_core::models::NoteId;

use crate::state::AppState;

/// Editor pane bound two-way to the draft, with debounced autosave.
#[component]
pub fn EditorPane() -> Element {
    let state = use_context::<AppState>();
    let snapshot = (state.snapshot)();
    let colors = (state.theme)().palette();

    // Local mirrors of the draft fields so typing stays responsive; the
    // controller remains the owner of dirty/saving state.
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut last_note_id = use_signal(|| None::<NoteId>);

    // Sync the local fields when the selected note changes
    use_effect(move || {
        let snapshot = (state.snapshot)();
        let current_id = snapshot.selected();

        if current_id != *last_note_id.read() {
            title.set(snapshot.draft.title.clone());
            content.set(snapshot.draft.content.clone());
            last_note_id.set(current_id);
        }
    });

    let has_selection = snapshot.selected().is_some();
    let saving = snapshot.state == DraftState::Saving;

    let on_title_input = move |evt: Event<FormData>| {
        let value = evt.value();
        title.set(value.clone());
        state.with_controller(move |controller| async move {
            controller.edit(DraftField::Title, value).await;
        });
    };

    let on_content_input = move |evt: Event<FormData>| {
        let value = evt.value();
        content.set(value.clone());
        state.with_controller(move |controller| async move {
            controller.edit(DraftField::Content, value).await;
        });
    };

    let on_keydown = move |evt: Event<KeyboardData>| {
        // Ctrl+S to save immediately
        if evt.modifiers().ctrl() && evt.key() == Key::Character("s".to_string()) {
            evt.prevent_default();
            state.with_controller(|controller| async move {
                controller.save_now().await;
            });
        }
    };

    rsx! {
        div {
            class: "editor-pane",
            style: "
                flex: 1;
                display: flex;
                flex-direction: column;
                padding: 16px;
                background: {colors.bg_primary};
            ",

            if has_selection {
                div {
                    style: "display: flex; align-items: center; gap: 8px; margin-bottom: 8px;",

                    input {
                        class: "editor-title",
                        style: "
                            flex: 1;
                            border: none;
                            outline: none;
                            font-size: 18px;
                            font-weight: 600;
                            background: transparent;
                            color: {colors.text_primary};
                        ",
                        value: "{title}",
                        placeholder: "Title",
                        oninput: on_title_input,
                        onkeydown: on_keydown,
                    }

                    if saving {
                        div {
                            class: "saving-indicator",
                            style: "font-size: 12px; color: {colors.text_muted};",
                            "Saving..."
                        }
                    }
                }

                textarea {
                    class: "editor-content",
                    style: "
                        flex: 1;
                        width: 100%;
                        border: none;
                        outline: none;
                        resize: none;
                        font-family: inherit;
                        font-size: inherit;
                        line-height: 1.6;
                        background: transparent;
                        color: {colors.text_primary};
                    ",
                    value: "{content}",
                    placeholder: "Start typing...",
                    disabled: !has_selection,
                    oninput: on_content_input,
                    onkeydown: on_keydown,
                }
            } else {
                div {
                    class: "editor-placeholder",
                    style: "
                        flex: 1;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        color: {colors.text_muted};
                    ",
                    "Select a note or create a new one"
                }
            }
        }
    }
}
