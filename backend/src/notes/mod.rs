//! Client side of the structured-notes service.
//!
//! The service owns the collections; this module reads a collection's column
//! schema, creates records in it, and provisions collections (creating one or
//! adding columns to an existing one). [`NotesApi`] is the seam the submitter
//! and the setup endpoints talk to, [`HttpNotesClient`] its `reqwest`
//! implementation.

mod client;
mod values;
mod wire;

#[cfg(test)]
pub mod fake;

pub use client::HttpNotesClient;
pub use values::{ColumnSpec, ColumnValue, RecordProperties};

use async_trait::async_trait;
use common::model::schema::RemoteSchema;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotesError {
    /// The service answered with a non-2xx status. `body` is the parsed JSON
    /// body, or the raw text when it is not JSON.
    #[error("notes service answered with status {status}")]
    Status { status: u16, body: Value },

    #[error("transport error: {0}")]
    Transport(Box<reqwest::Error>),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for NotesError {
    fn from(error: reqwest::Error) -> Self {
        NotesError::Transport(Box::new(error))
    }
}

/// A record the service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRecord {
    pub id: String,
    pub url: String,
}

/// A collection the service created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCollection {
    pub id: String,
    pub schema: RemoteSchema,
}

#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Reads the current column schema of a collection. One attempt, no retry.
    async fn fetch_schema(&self, collection_id: &str) -> Result<RemoteSchema, NotesError>;

    /// Creates one record in a collection from a properties map keyed by column name.
    async fn create_record(
        &self,
        collection_id: &str,
        properties: &RecordProperties,
    ) -> Result<CreatedRecord, NotesError>;

    /// Most recently edited page shared with the integration.
    async fn find_parent_page(&self) -> Result<Option<String>, NotesError>;

    async fn create_collection(
        &self,
        parent_page_id: &str,
        title: &str,
        columns: &[ColumnSpec],
    ) -> Result<CreatedCollection, NotesError>;

    /// Adds columns to a collection and returns the updated schema. Columns
    /// already present under the same name are redefined by the service, so
    /// callers send only the missing ones.
    async fn add_columns(
        &self,
        collection_id: &str,
        columns: &[ColumnSpec],
    ) -> Result<RemoteSchema, NotesError>;
}
