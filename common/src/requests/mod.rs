use serde::Deserialize;

/// Body of `POST /api/quotes/save`.
///
/// Every field is optional at the wire level so that missing required fields
/// are reported together instead of failing deserialization on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveQuoteRequest {
    #[serde(default)]
    pub quote_es: Option<String>,
    #[serde(default)]
    pub quote_en: Option<String>,
    #[serde(default)]
    pub author_es: Option<String>,
    #[serde(default)]
    pub author_en: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Body of `POST /api/collection/create`. An empty body is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCollectionRequest {
    /// Page to create the collection under; overrides the configured one.
    #[serde(default)]
    pub parent_page_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}
