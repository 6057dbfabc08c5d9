//! Failure taxonomy of quote submission and collection setup, and its HTTP
//! rendering.
//!
//! Every variant is answered with a JSON body carrying enough detail (attempted
//! mapping, available columns, remote status and body) for an operator to fix
//! the remote collection or the credentials.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::mapping::FieldMapping;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required record fields are missing or malformed. Raised before any remote call.
    #[error("{message}")]
    Validation {
        message: String,
        /// Presence of each required inbound field.
        received: BTreeMap<&'static str, bool>,
        /// Names of the fields that failed.
        fields: Vec<&'static str>,
    },

    #[error("missing configuration: {}", missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    #[error("collection schema unavailable: {reason}")]
    SchemaUnavailable {
        status: Option<u16>,
        reason: String,
        details: Value,
    },

    #[error("collection has no title column")]
    MappingUnresolved { available: Vec<String> },

    #[error("remote write rejected with status {status}")]
    RemoteWriteRejected {
        status: u16,
        details: Value,
        mapping: FieldMapping,
        available: Vec<String>,
    },

    /// The write returned 2xx but its body could not be read, so the record
    /// may exist.
    #[error("write not confirmed: {reason}")]
    WriteUnconfirmed {
        reason: String,
        mapping: FieldMapping,
    },

    #[error("collection setup rejected with status {status}")]
    SetupRejected {
        status: u16,
        details: Value,
        requested: Vec<String>,
    },

    #[error("no page is shared with the integration to hold a new collection")]
    NoParentPage,

    #[error("network error: {0}")]
    Network(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl SubmitError {
    fn body(&self) -> Value {
        match self {
            SubmitError::Validation {
                message,
                received,
                fields,
            } => json!({
                "error": message,
                "details": fields,
                "received": received,
            }),
            SubmitError::Configuration { missing } => json!({
                "error": "Missing configuration",
                "message": self.to_string(),
                "missing": missing,
                "suggestion": "Set the notes API key and collection id in the server environment",
            }),
            SubmitError::SchemaUnavailable {
                status,
                reason,
                details,
            } => json!({
                "error": "Cannot access collection",
                "status": status,
                "message": reason,
                "details": details,
                "suggestion": "Share the collection with the notes integration and check the collection id",
            }),
            SubmitError::MappingUnresolved { available } => json!({
                "error": "No title column found in collection",
                "details": "The collection must expose exactly one title-typed column",
                "availableColumns": available,
            }),
            SubmitError::RemoteWriteRejected {
                status,
                details,
                mapping,
                available,
            } => json!({
                "error": "Failed to save to collection",
                "status": status,
                "details": details,
                "mapping": mapping,
                "availableColumns": available,
                "suggestion": "Check the column names and types of the collection",
            }),
            SubmitError::WriteUnconfirmed { reason, mapping } => json!({
                "error": "Save not confirmed",
                "message": "The notes service accepted the write but its response could not be read; check the collection before saving again",
                "details": reason,
                "mapping": mapping,
            }),
            SubmitError::SetupRejected {
                status,
                details,
                requested,
            } => json!({
                "error": "Failed to update collection",
                "status": status,
                "details": details,
                "requestedColumns": requested,
                "suggestion": "Check that the integration can edit the collection",
            }),
            SubmitError::NoParentPage => json!({
                "error": "No parent page available",
                "message": self.to_string(),
                "suggestion": "Share a page with the integration or set NOTION_PARENT_PAGE_ID",
            }),
            SubmitError::Network(message) => json!({
                "error": "Notes service unreachable",
                "message": message,
            }),
            SubmitError::Internal(message) => json!({
                "error": "Internal server error",
                "message": message,
            }),
        }
    }
}

impl ResponseError for SubmitError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmitError::Validation { .. }
            | SubmitError::SchemaUnavailable { .. }
            | SubmitError::MappingUnresolved { .. }
            | SubmitError::RemoteWriteRejected { .. }
            | SubmitError::SetupRejected { .. }
            | SubmitError::NoParentPage => StatusCode::BAD_REQUEST,
            SubmitError::Configuration { .. }
            | SubmitError::WriteUnconfirmed { .. }
            | SubmitError::Network(_)
            | SubmitError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}
