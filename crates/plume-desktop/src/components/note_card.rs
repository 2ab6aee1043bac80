//! Note card component

use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;

use crate::state::AppState;

/// A single note row rendered in the note list.
#[component]
pub fn NoteCard(
    title: String,
    preview: String,
    updated: DateTime<Utc>,
    is_selected: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let bg = if is_selected {
        colors.bg_tertiary
    } else {
        colors.bg_primary
    };
    let border_left = if is_selected {
        format!("3px solid {}", colors.accent)
    } else {
        "3px solid transparent".to_string()
    };
    let updated_label = format_updated_at(updated);

    rsx! {
        div {
            class: if is_selected { "note-item selected" } else { "note-item" },
            style: "
                padding: 12px 16px;
                border-bottom: 1px solid {colors.border_light};
                border-left: {border_left};
                cursor: pointer;
                background: {bg};
                transition: background 0.15s;
            ",
            onclick: move |evt| onclick.call(evt),

            div {
                class: "note-title",
                style: "
                    font-weight: 500;
                    margin-bottom: 4px;
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    color: {colors.text_primary};
                ",
                "{title}"
            }

            div {
                class: "note-preview",
                style: "
                    font-size: 12px;
                    color: {colors.text_secondary};
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                ",
                "{preview}"
            }

            div {
                class: "note-updated",
                style: "
                    margin-top: 4px;
                    font-size: 11px;
                    color: {colors.text_muted};
                ",
                "{updated_label}"
            }
        }
    }
}

/// Render a last-modified instant in the viewer's local time.
fn format_updated_at(updated: DateTime<Utc>) -> String {
    updated
        .with_timezone(&Local)
        .format("%b %e, %Y %H:%M")
        .to_string()
}
