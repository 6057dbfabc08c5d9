use serde::{Deserialize, Serialize};

/// The type a remote collection declares for one of its columns.
///
/// Only the first five variants can receive a value from a quote. Every other
/// remote type is kept as `Unsupported` with its remote name, so diagnostics can
/// still list the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Title,
    Text,
    Date,
    SingleSelect,
    MultiSelect,
    Unsupported(String),
}

impl ColumnType {
    /// Whether a free-text value can be written into a column of this type.
    pub fn is_text_compatible(&self) -> bool {
        matches!(
            self,
            ColumnType::Text | ColumnType::SingleSelect | ColumnType::MultiSelect
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Live column layout of a remote collection, in the order the remote lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSchema {
    /// Human readable collection title.
    pub title: String,
    /// Canonical URL of the collection, when the remote reports one.
    pub url: Option<String>,
    pub columns: Vec<Column>,
}

impl RemoteSchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn first_of_type(&self, column_type: &ColumnType) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| &column.column_type == column_type)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }
}
