//! Note model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::UserId;

/// A unique identifier for a note, assigned by the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new random note ID (the hosted store assigns ids the same way)
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A note owned by a single user.
///
/// The remote collection is the source of truth; instances held by the
/// client are cache mirrors of the persisted rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier (store-assigned, immutable)
    pub id: NoteId,
    /// Title text
    pub title: String,
    /// Rich text markup, opaque to this system
    pub content: String,
    /// Creation instant, assigned by the store
    pub created_at: DateTime<Utc>,
    /// Last-modified instant, assigned by the store on every write
    pub updated_at: DateTime<Utc>,
    /// Owning user
    pub owner_id: UserId,
}

impl Note {
    /// Get the title truncated to `max_len` characters, for list rows
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        let preview: String = self.title.chars().take(max_len).collect();
        if preview.trim().is_empty() {
            "Untitled Note".to_string()
        } else {
            preview
        }
    }

    /// First line of the content with markup tags stripped, for list rows
    #[must_use]
    pub fn content_preview(&self, max_len: usize) -> String {
        let mut plain = String::new();
        let mut in_tag = false;
        for ch in self.content.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                '\n' if !in_tag => break,
                _ if !in_tag => plain.push(ch),
                _ => {}
            }
        }
        plain.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(title: &str, content: &str) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId::new(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            owner_id: UserId::from("user-1"),
        }
    }

    #[test]
    fn note_id_unique() {
        assert_ne!(NoteId::new(), NoteId::new());
    }

    #[test]
    fn note_id_parse_roundtrip() {
        let id = NoteId::new();
        let parsed: NoteId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn title_preview_truncates() {
        let n = note("A very long meeting title", "");
        assert_eq!(n.title_preview(6), "A very");
    }

    #[test]
    fn title_preview_falls_back_when_blank() {
        let n = note("   ", "");
        assert_eq!(n.title_preview(40), "Untitled Note");
    }

    #[test]
    fn content_preview_strips_markup() {
        let n = note("t", "<p>Hello <b>world</b></p>");
        assert_eq!(n.content_preview(60), "Hello world");
    }

    #[test]
    fn content_preview_stops_at_first_line() {
        let n = note("t", "first line\nsecond line");
        assert_eq!(n.content_preview(60), "first line");
    }
}
