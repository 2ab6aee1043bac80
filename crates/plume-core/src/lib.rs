//! plume-core - Core library for Plume
//!
//! This crate contains the shared models, the auth gate over the hosted
//! identity service, the note store adapter over the hosted document
//! collection, and the editor state controller used by the client UI.

pub mod auth;
pub mod config;
pub mod editor;
pub mod error;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{Note, NoteId, UserId};
