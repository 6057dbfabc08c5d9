use chrono::NaiveDate;
use common::model::schema::ColumnType;
use serde_json::{json, Map, Value};

/// Longest content the service accepts in a single text run.
pub const MAX_RUN_CHARS: usize = 2000;

/// A value for one remote column, shaped by the column's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Title(String),
    Text(String),
    Date(NaiveDate),
    Select(String),
    MultiSelect(Vec<String>),
}

impl ColumnValue {
    /// Free text for a column of `column_type`, or `None` when the type cannot hold text.
    pub fn text_for(column_type: &ColumnType, content: &str) -> Option<ColumnValue> {
        match column_type {
            ColumnType::Text => Some(ColumnValue::Text(content.to_string())),
            ColumnType::SingleSelect => Some(ColumnValue::Select(option_name(content))),
            ColumnType::MultiSelect => Some(ColumnValue::MultiSelect(vec![option_name(content)])),
            ColumnType::Title => Some(ColumnValue::Title(content.to_string())),
            ColumnType::Date | ColumnType::Unsupported(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ColumnValue::Title(content) => json!({ "title": text_runs(content) }),
            ColumnValue::Text(content) => json!({ "rich_text": text_runs(content) }),
            ColumnValue::Date(date) => json!({ "date": { "start": date.format("%Y-%m-%d").to_string() } }),
            ColumnValue::Select(name) => json!({ "select": { "name": name } }),
            ColumnValue::MultiSelect(names) => {
                let options: Vec<Value> = names.iter().map(|name| json!({ "name": name })).collect();
                json!({ "multi_select": options })
            }
        }
    }
}

// Option names cannot contain commas.
fn option_name(content: &str) -> String {
    content.replace(',', " ").trim().to_string()
}

fn text_runs(content: &str) -> Vec<Value> {
    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(MAX_RUN_CHARS)
        .map(|chunk| {
            let run: String = chunk.iter().collect();
            json!({ "type": "text", "text": { "content": run } })
        })
        .collect()
}

/// Properties of a record to create, keyed by column name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordProperties {
    entries: Vec<(String, ColumnValue)>,
}

impl RecordProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column`, replacing an earlier value for the same column.
    pub fn insert(&mut self, column: impl Into<String>, value: ColumnValue) {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

/// Definition of a column to add to a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: ColumnType,
    /// Predefined `(name, color)` options of select columns.
    pub options: Vec<(String, String)>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: &[(&str, &str)]) -> Self {
        self.options = options
            .iter()
            .map(|(name, color)| (name.to_string(), color.to_string()))
            .collect();
        self
    }

    /// The column's type definition as the service expects it in a schema update.
    pub fn to_json(&self) -> Value {
        let options = || -> Vec<Value> {
            self.options
                .iter()
                .map(|(name, color)| json!({ "name": name, "color": color }))
                .collect()
        };
        match &self.column_type {
            ColumnType::Title => json!({ "title": {} }),
            ColumnType::Text => json!({ "rich_text": {} }),
            ColumnType::Date => json!({ "date": {} }),
            ColumnType::SingleSelect => json!({ "select": { "options": options() } }),
            ColumnType::MultiSelect => json!({ "multi_select": { "options": options() } }),
            ColumnType::Unsupported(kind) => {
                let mut definition = Map::new();
                definition.insert(kind.clone(), json!({}));
                Value::Object(definition)
            }
        }
    }
}

/// Schema definitions keyed by column name, in the given order.
pub fn columns_to_json(columns: &[ColumnSpec]) -> Value {
    let map: Map<String, Value> = columns
        .iter()
        .map(|column| (column.name.clone(), column.to_json()))
        .collect();
    Value::Object(map)
}
