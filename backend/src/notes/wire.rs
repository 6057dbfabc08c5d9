//! Decoding of notes service responses.

use super::{CreatedCollection, CreatedRecord, NotesError};
use common::model::schema::{Column, ColumnType, RemoteSchema};
use serde_json::Value;

pub fn column_type_from_remote(name: &str) -> ColumnType {
    match name {
        "title" => ColumnType::Title,
        "rich_text" => ColumnType::Text,
        "date" => ColumnType::Date,
        "select" => ColumnType::SingleSelect,
        "multi_select" => ColumnType::MultiSelect,
        other => ColumnType::Unsupported(other.to_string()),
    }
}

/// Parses an error body as JSON, falling back to the raw text.
pub fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Reads the collection title, URL and columns out of a collection object.
/// Columns keep the order in which the service lists them.
pub fn parse_schema(value: &Value) -> Result<RemoteSchema, NotesError> {
    let properties = value
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| NotesError::Decode("collection has no properties object".to_string()))?;

    let mut columns = Vec::with_capacity(properties.len());
    for (name, property) in properties {
        let remote_type = property
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| NotesError::Decode(format!("column {name:?} has no type")))?;
        columns.push(Column::new(name.clone(), column_type_from_remote(remote_type)));
    }

    Ok(RemoteSchema {
        title: collection_title(value),
        url: value.get("url").and_then(Value::as_str).map(str::to_string),
        columns,
    })
}

fn collection_title(value: &Value) -> String {
    let title: String = value
        .get("title")
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|run| {
                    run.get("plain_text")
                        .or_else(|| run.pointer("/text/content"))
                        .and_then(Value::as_str)
                })
                .collect()
        })
        .unwrap_or_default();

    if title.trim().is_empty() {
        "Untitled".to_string()
    } else {
        title
    }
}

pub fn parse_created(value: &Value) -> Result<CreatedRecord, NotesError> {
    let field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| NotesError::Decode(format!("created record has no {key}")))
    };
    Ok(CreatedRecord {
        id: field("id")?,
        url: field("url")?,
    })
}

/// A freshly created collection: its id plus the schema it was created with.
pub fn parse_created_collection(value: &Value) -> Result<CreatedCollection, NotesError> {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| NotesError::Decode("created collection has no id".to_string()))?;
    Ok(CreatedCollection {
        id: id.to_string(),
        schema: parse_schema(value)?,
    })
}

/// Id of the first page of a search result, if any.
pub fn parse_first_page(value: &Value) -> Result<Option<String>, NotesError> {
    let results = value
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| NotesError::Decode("search result has no results array".to_string()))?;
    Ok(results
        .iter()
        .find_map(|page| page.get("id").and_then(Value::as_str))
        .map(str::to_string))
}
