use crate::model::schema::ColumnType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical purpose of a quote field, matched against a real column before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Title,
    Date,
    PrimaryBody,
    PrimaryAuthor,
    SecondaryBody,
    SecondaryAuthor,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Title,
        Role::Date,
        Role::PrimaryBody,
        Role::PrimaryAuthor,
        Role::SecondaryBody,
        Role::SecondaryAuthor,
    ];

    /// Whether a column of `column_type` can hold this role's value.
    pub fn accepts(self, column_type: &ColumnType) -> bool {
        match self {
            Role::Title => *column_type == ColumnType::Title,
            Role::Date => *column_type == ColumnType::Date,
            Role::PrimaryBody
            | Role::PrimaryAuthor
            | Role::SecondaryBody
            | Role::SecondaryAuthor => column_type.is_text_compatible(),
        }
    }
}

/// Role to column assignment for one submission.
///
/// Roles without a matching column are absent. A column is never assigned to
/// more than one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping(BTreeMap<Role, String>);

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: Role, column: impl Into<String>) {
        self.0.insert(role, column.into());
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        self.0.get(&role).map(String::as_str)
    }

    pub fn is_column_taken(&self, column: &str) -> bool {
        self.0.values().any(|taken| taken == column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.0.iter().map(|(role, column)| (*role, column.as_str()))
    }
}
