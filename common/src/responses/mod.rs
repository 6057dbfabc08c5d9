use crate::model::mapping::FieldMapping;
use serde::{Deserialize, Serialize};

/// Success body of `POST /api/quotes/save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuoteResponse {
    pub success: bool,
    pub message: String,
    pub page_id: String,
    pub url: String,
    /// Title of the collection the quote was written to.
    pub collection: String,
    /// Role to column assignment that produced the written properties.
    pub mapping: FieldMapping,
    /// Column names present in the written payload, in payload order.
    pub properties_used: Vec<String>,
}

/// Success body of `POST /api/collection/setup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupCollectionResponse {
    pub success: bool,
    pub message: String,
    pub collection: String,
    pub url: Option<String>,
    /// Every column of the collection after the update.
    pub columns: Vec<String>,
    /// Columns this call added; empty when nothing was missing.
    pub added_columns: Vec<String>,
}

/// Success body of `POST /api/collection/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionResponse {
    pub success: bool,
    pub message: String,
    pub collection_id: String,
    pub collection: String,
    pub url: Option<String>,
    pub parent_page_id: String,
    pub columns: Vec<String>,
}
