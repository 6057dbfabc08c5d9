//! Schema-adaptive quote submission.
//!
//! One call runs one pass of the pipeline: fetch the collection schema, resolve
//! which column receives each role, build the properties, write the record.
//! There is no retry and no alternate payload; a rejected write is reported
//! together with the mapping that was tried and the columns that exist.

pub mod payload;
pub mod record;
pub mod resolver;

use crate::config::mask;
use crate::error::SubmitError;
use crate::notes::{NotesApi, NotesError};
use common::model::mapping::FieldMapping;
use log::{info, warn};
use record::QuoteRecord;
use serde_json::Value;

/// Tunables for payload construction.
#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub title_max_chars: usize,
}

/// Successful outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub record_id: String,
    pub url: String,
    pub collection_title: String,
    pub mapping: FieldMapping,
    pub properties_used: Vec<String>,
}

pub(crate) fn schema_unavailable(error: NotesError) -> SubmitError {
    match error {
        NotesError::Status { status, body } => SubmitError::SchemaUnavailable {
            status: Some(status),
            reason: format!("notes service answered with status {status}"),
            details: body,
        },
        other => SubmitError::SchemaUnavailable {
            status: None,
            reason: other.to_string(),
            details: Value::Null,
        },
    }
}

pub async fn submit(
    api: &dyn NotesApi,
    collection_id: &str,
    record: &QuoteRecord,
    settings: &SubmitSettings,
) -> Result<SubmissionReceipt, SubmitError> {
    info!(
        "saving quote: collection={}, date={}, length={}",
        mask(collection_id),
        record.occurred_on,
        record.primary_text.chars().count()
    );

    let schema = api
        .fetch_schema(collection_id)
        .await
        .map_err(schema_unavailable)?;
    info!(
        "collection {:?}: {} columns {:?}",
        schema.title,
        schema.columns.len(),
        schema.column_names()
    );

    let mapping = resolver::resolve(&schema)?;
    info!("detected mapping: {mapping:?}");

    let properties = payload::build(record, &mapping, &schema, settings.title_max_chars);
    let properties_used = properties.column_names();
    info!("writing {} properties {properties_used:?}", properties.len());

    match api.create_record(collection_id, &properties).await {
        Ok(created) => {
            info!("quote saved as {}", created.id);
            Ok(SubmissionReceipt {
                record_id: created.id,
                url: created.url,
                collection_title: schema.title,
                mapping,
                properties_used,
            })
        }
        Err(NotesError::Status { status, body }) => {
            warn!("write rejected with status {status}: {body}");
            Err(SubmitError::RemoteWriteRejected {
                status,
                details: body,
                mapping,
                available: schema.column_names(),
            })
        }
        Err(NotesError::Decode(reason)) => {
            warn!("write accepted but its response could not be read: {reason}");
            Err(SubmitError::WriteUnconfirmed { reason, mapping })
        }
        Err(other) => {
            warn!("write failed: {other}");
            Err(SubmitError::Network(other.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::fake::{quotes_schema, FakeNotes, Reply};
    use chrono::NaiveDate;
    use common::model::mapping::Role;
    use common::model::schema::{Column, ColumnType, RemoteSchema};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn settings() -> SubmitSettings {
        SubmitSettings { title_max_chars: 60 }
    }

    fn record() -> QuoteRecord {
        QuoteRecord {
            primary_text: "Knowledge is power.".to_string(),
            primary_author: Some("Francis Bacon".to_string()),
            secondary_text: Some("El conocimiento es poder.".to_string()),
            secondary_author: None,
            occurred_on: NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
        }
    }

    #[actix_web::test]
    async fn successful_write_reports_mapping_and_record() {
        let notes = FakeNotes::new(quotes_schema());
        let receipt = submit(&notes, "db", &record(), &settings()).await.unwrap();

        assert_eq!(receipt.record_id, "abc123");
        assert_eq!(receipt.url, "https://notes.example/abc123");
        assert_eq!(receipt.collection_title, "Citas Diarias");
        assert_eq!(receipt.mapping.get(Role::SecondaryBody), Some("Cita EN"));
        assert_eq!(
            receipt.properties_used,
            vec!["Nombre", "Fecha", "Cita", "Autor", "Cita EN"]
        );
        assert_eq!(notes.schema_calls(), 1);
        assert_eq!(notes.write_calls(), 1);
        assert_eq!(notes.written().unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn schema_rejection_skips_the_write() {
        let notes = FakeNotes::with_replies(
            Reply::Status(401, json!({ "code": "unauthorized" })),
            Reply::Malformed("unused"),
        );
        let err = submit(&notes, "db", &record(), &settings()).await.unwrap_err();

        match err {
            SubmitError::SchemaUnavailable { status, details, .. } => {
                assert_eq!(status, Some(401));
                assert_eq!(details, json!({ "code": "unauthorized" }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(notes.write_calls(), 0);
    }

    #[actix_web::test]
    async fn collection_without_title_is_never_written() {
        let schema = RemoteSchema {
            title: "Broken".to_string(),
            url: None,
            columns: vec![Column::new("Fecha", ColumnType::Date)],
        };
        let notes = FakeNotes::new(schema);
        let err = submit(&notes, "db", &record(), &settings()).await.unwrap_err();

        assert!(matches!(err, SubmitError::MappingUnresolved { .. }));
        assert_eq!(notes.write_calls(), 0);
    }

    #[actix_web::test]
    async fn rejected_write_carries_remote_body_and_columns() {
        let body = json!({ "message": "Name is not a property that exists" });
        let notes = FakeNotes::with_replies(
            Reply::Ok(quotes_schema()),
            Reply::Status(400, body.clone()),
        );
        let err = submit(&notes, "db", &record(), &settings()).await.unwrap_err();

        match err {
            SubmitError::RemoteWriteRejected {
                status,
                details,
                mapping,
                available,
            } => {
                assert_eq!(status, 400);
                assert_eq!(details, body);
                assert_eq!(mapping.get(Role::Title), Some("Nombre"));
                assert_eq!(available, vec!["Nombre", "Cita", "Autor", "Cita EN", "Fecha"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn unreadable_write_response_is_unconfirmed_not_unreachable() {
        let notes = FakeNotes::with_replies(Reply::Ok(quotes_schema()), Reply::Malformed("eof"));
        let err = submit(&notes, "db", &record(), &settings()).await.unwrap_err();

        match err {
            SubmitError::WriteUnconfirmed { reason, mapping } => {
                assert_eq!(reason, "eof");
                assert_eq!(mapping.get(Role::Title), Some("Nombre"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(notes.write_calls(), 1);
    }
}
