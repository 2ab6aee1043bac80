//! PostgREST-backed implementation of the note store.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::is_http_url;
use crate::error::{StoreError, StoreResult};
use crate::models::{Note, NoteId, UserId};

use super::{NewNote, NoteFields, NoteStore};

/// Note store over the hosted `notes` table (`rest/v1/notes`).
///
/// Bound to one access token; clients construct a fresh store per sign-in
/// and drop it on sign-out.
#[derive(Clone)]
pub struct SupabaseNoteStore {
    rest_url: String,
    anon_key: String,
    access_token: String,
    client: Client,
}

impl SupabaseNoteStore {
    pub fn new(
        url: impl AsRef<str>,
        anon_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> StoreResult<Self> {
        let rest_url = normalize_rest_url(url.as_ref())?;
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(StoreError::Unknown("anon key must not be empty".to_string()));
        }

        Ok(Self {
            rest_url,
            anon_key,
            access_token: access_token.into(),
            client: Client::builder().build()?,
        })
    }

    fn notes_endpoint(&self) -> String {
        format!("{}/notes", self.rest_url)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.access_token)
    }

    async fn read_success_body(response: Response) -> StoreResult<String> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            Ok(body)
        } else {
            Err(classify_store_error(status, &body))
        }
    }
}

impl NoteStore for SupabaseNoteStore {
    async fn list(&self, owner: &UserId) -> StoreResult<Vec<Note>> {
        tracing::debug!("Listing notes for {}", owner);
        let request = self.authed(self.client.get(self.notes_endpoint()).query(&[
            ("select", "*"),
            ("owner_id", &format!("eq.{owner}")),
            ("order", "updated_at.desc"),
        ]));

        let body = Self::read_success_body(request.send().await?).await?;
        parse_rows(&body)
    }

    async fn create(&self, new: NewNote) -> StoreResult<Note> {
        let payload = serde_json::json!({
            "title": new.title,
            "content": new.content,
            "owner_id": new.owner_id,
        });
        let request = self
            .authed(self.client.post(self.notes_endpoint()).json(&payload))
            .header("Prefer", "return=representation");

        let body = Self::read_success_body(request.send().await?).await?;
        parse_rows(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Unknown("create returned no row".to_string()))
    }

    async fn update(&self, id: &NoteId, fields: NoteFields) -> StoreResult<Note> {
        let patch = fields_to_patch(&fields);
        if patch.is_empty() {
            return Err(StoreError::Unknown("no fields to update".to_string()));
        }

        let request = self
            .authed(
                self.client
                    .patch(self.notes_endpoint())
                    .query(&[("id", format!("eq.{id}"))])
                    .json(&Value::Object(patch)),
            )
            .header("Prefer", "return=representation");

        let body = Self::read_success_body(request.send().await?).await?;
        parse_rows(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Unknown(format!("note no longer exists: {id}")))
    }

    async fn delete(&self, id: &NoteId) -> StoreResult<()> {
        let request = self.authed(
            self.client
                .delete(self.notes_endpoint())
                .query(&[("id", format!("eq.{id}"))]),
        );

        // PostgREST answers 204 whether or not a row matched, which gives us
        // the idempotency the contract asks for.
        Self::read_success_body(request.send().await?).await?;
        Ok(())
    }
}

/// Schema of a persisted note row. Deserializing through this type is the
/// validation boundary: malformed documents fail fast as
/// `StoreError::Unknown` instead of propagating missing fields.
#[derive(Debug, Deserialize)]
struct NoteRow {
    id: NoteId,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_id: UserId,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner_id: row.owner_id,
        }
    }
}

fn parse_rows(body: &str) -> StoreResult<Vec<Note>> {
    let rows: Vec<NoteRow> = serde_json::from_str(body)?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Only fields that are actually set end up in the PATCH body.
fn fields_to_patch(fields: &NoteFields) -> Map<String, Value> {
    let mut patch = Map::new();
    if let Some(title) = &fields.title {
        patch.insert("title".to_string(), Value::String(title.clone()));
    }
    if let Some(content) = &fields.content {
        patch.insert("content".to_string(), Value::String(content.clone()));
    }
    patch
}

fn normalize_rest_url(url: &str) -> StoreResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(StoreError::Unknown("URL must not be empty".to_string()));
    }
    if !is_http_url(trimmed) {
        return Err(StoreError::Unknown(
            "URL must include http:// or https://".to_string(),
        ));
    }
    if trimmed.ends_with("/rest/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/rest/v1"))
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorResponse {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn classify_store_error(status: StatusCode, body: &str) -> StoreError {
    let message = serde_json::from_str::<PostgrestErrorResponse>(body)
        .ok()
        .and_then(|payload| payload.message.or(payload.details).or(payload.hint))
        .unwrap_or_else(|| body.trim().to_string());
    let message = if message.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", message, status.as_u16())
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Permission(message),
        _ => StoreError::Unknown(message),
    }
}
