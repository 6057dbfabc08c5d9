//! Builds the properties of the record to create from a quote and a resolved mapping.

use super::record::QuoteRecord;
use crate::notes::{ColumnValue, RecordProperties};
use common::model::mapping::{FieldMapping, Role};
use common::model::schema::{ColumnType, RemoteSchema};

pub const ELLIPSIS: &str = "...";
pub const PRIMARY_AUTHOR_PLACEHOLDER: &str = "Desconocido";
pub const SECONDARY_AUTHOR_PLACEHOLDER: &str = "Unknown";

/// Cuts `text` to `max_chars` characters, marking the cut with [`ELLIPSIS`].
pub fn truncate_title(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str(ELLIPSIS);
    cut
}

fn role_value(
    record: &QuoteRecord,
    role: Role,
    column_type: &ColumnType,
    title_max_chars: usize,
) -> Option<ColumnValue> {
    match role {
        Role::Title => match column_type {
            ColumnType::Title => Some(ColumnValue::Title(truncate_title(
                &record.primary_text,
                title_max_chars,
            ))),
            _ => None,
        },
        Role::Date => match column_type {
            ColumnType::Date => Some(ColumnValue::Date(record.occurred_on)),
            _ => None,
        },
        Role::PrimaryBody => ColumnValue::text_for(column_type, &record.primary_text),
        Role::PrimaryAuthor => ColumnValue::text_for(
            column_type,
            record.primary_author.as_deref().unwrap_or(PRIMARY_AUTHOR_PLACEHOLDER),
        ),
        Role::SecondaryBody => record
            .secondary_text
            .as_deref()
            .and_then(|text| ColumnValue::text_for(column_type, text)),
        Role::SecondaryAuthor => ColumnValue::text_for(
            column_type,
            record.secondary_author.as_deref().unwrap_or(SECONDARY_AUTHOR_PLACEHOLDER),
        ),
    }
}

/// Roles absent from `mapping`, or whose column cannot hold their value, are
/// left out of the payload rather than sent empty.
pub fn build(
    record: &QuoteRecord,
    mapping: &FieldMapping,
    schema: &RemoteSchema,
    title_max_chars: usize,
) -> RecordProperties {
    let mut properties = RecordProperties::new();

    for role in Role::ALL {
        let Some(column) = mapping.get(role).and_then(|name| schema.column(name)) else {
            continue;
        };
        if let Some(value) = role_value(record, role, &column.column_type, title_max_chars) {
            properties.insert(column.name.clone(), value);
        }
    }

    properties
}
