//! Home view - main application screen

use dioxus::prelude::*;

use crate::components::{DeleteModal, EditorPane, NoteList, Toolbar};
use crate::state::AppState;

/// Home view component - the main application screen
#[component]
pub fn Home() -> Element {
    let state = use_context::<AppState>();
    let pending_delete = (state.snapshot)().pending_delete;

    rsx! {
        div {
            class: "home-container",
            style: "display: flex; flex-direction: column; height: 100vh;",

            Toolbar {}

            div {
                class: "content-area",
                style: "flex: 1; display: flex; overflow: hidden;",

                NoteList {}
                EditorPane {}
            }

            if pending_delete.is_some() {
                DeleteModal {}
            }
        }
    }
}
