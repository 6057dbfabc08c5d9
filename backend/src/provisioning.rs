//! Provisioning of the quotes collection: creating a new one, or adding the
//! columns an existing collection lacks. Existing columns are never redefined.

use crate::config::mask;
use crate::error::SubmitError;
use crate::notes::{ColumnSpec, NotesApi, NotesError};
use crate::submitter::schema_unavailable;
use common::model::schema::{ColumnType, RemoteSchema};
use log::{info, warn};

pub const DEFAULT_COLLECTION_TITLE: &str = "Citas Diarias";

/// Columns of a fully provisioned quotes collection.
pub fn quote_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Nombre", ColumnType::Title),
        ColumnSpec::new("Cita", ColumnType::Text),
        ColumnSpec::new("Autor", ColumnType::Text),
        ColumnSpec::new("Cita EN", ColumnType::Text),
        ColumnSpec::new("Autor EN", ColumnType::Text),
        ColumnSpec::new("Fecha", ColumnType::Date),
        ColumnSpec::new("Idioma", ColumnType::SingleSelect).with_options(&[
            ("Español", "blue"),
            ("Inglés", "green"),
            ("Bilingüe", "purple"),
        ]),
        ColumnSpec::new("Fuente", ColumnType::Text),
    ]
}

/// The wanted columns absent from `schema`, matched by exact name. A title
/// column is only wanted when the collection has none, since a collection
/// carries exactly one.
pub fn missing_columns(schema: &RemoteSchema, wanted: &[ColumnSpec]) -> Vec<ColumnSpec> {
    let has_title = schema.first_of_type(&ColumnType::Title).is_some();
    wanted
        .iter()
        .filter(|spec| schema.column(&spec.name).is_none())
        .filter(|spec| !(has_title && spec.column_type == ColumnType::Title))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub collection_title: String,
    pub url: Option<String>,
    pub columns: Vec<String>,
    pub added: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationReport {
    pub collection_id: String,
    pub collection_title: String,
    pub url: Option<String>,
    pub parent_page_id: String,
    pub columns: Vec<String>,
}

fn names(columns: &[ColumnSpec]) -> Vec<String> {
    columns.iter().map(|column| column.name.clone()).collect()
}

fn setup_failure(error: NotesError, requested: &[String]) -> SubmitError {
    match error {
        NotesError::Status { status, body } => {
            warn!("setup rejected with status {status}: {body}");
            SubmitError::SetupRejected {
                status,
                details: body,
                requested: requested.to_vec(),
            }
        }
        NotesError::Decode(reason) => {
            SubmitError::Internal(format!("unreadable response from notes service: {reason}"))
        }
        other => SubmitError::Network(other.to_string()),
    }
}

/// Adds every quote column the collection lacks, in one schema update. A
/// collection that already has them all is left untouched.
pub async fn add_missing_columns(
    api: &dyn NotesApi,
    collection_id: &str,
) -> Result<SetupReport, SubmitError> {
    info!("setting up collection {}", mask(collection_id));
    let schema = api
        .fetch_schema(collection_id)
        .await
        .map_err(schema_unavailable)?;

    let missing = missing_columns(&schema, &quote_columns());
    if missing.is_empty() {
        info!("collection {:?} already has every quote column", schema.title);
        return Ok(SetupReport {
            columns: schema.column_names(),
            collection_title: schema.title,
            url: schema.url,
            added: Vec::new(),
        });
    }

    let added = names(&missing);
    info!("adding columns {added:?} to {:?}", schema.title);
    let updated = api
        .add_columns(collection_id, &missing)
        .await
        .map_err(|e| setup_failure(e, &added))?;

    Ok(SetupReport {
        columns: updated.column_names(),
        collection_title: updated.title,
        url: updated.url,
        added,
    })
}

/// Creates a quotes collection under `parent_page_id`, or under the most
/// recently edited page shared with the integration when none is given.
pub async fn create_collection(
    api: &dyn NotesApi,
    parent_page_id: Option<&str>,
    title: &str,
) -> Result<CreationReport, SubmitError> {
    let parent = match parent_page_id {
        Some(id) => id.to_string(),
        None => api
            .find_parent_page()
            .await
            .map_err(|e| setup_failure(e, &[]))?
            .ok_or(SubmitError::NoParentPage)?,
    };

    let columns = quote_columns();
    info!("creating collection {title:?} under page {}", mask(&parent));
    let created = api
        .create_collection(&parent, title, &columns)
        .await
        .map_err(|e| setup_failure(e, &names(&columns)))?;
    info!("collection created as {}", created.id);

    Ok(CreationReport {
        collection_id: created.id,
        columns: created.schema.column_names(),
        collection_title: created.schema.title,
        url: created.schema.url,
        parent_page_id: parent,
    })
}
