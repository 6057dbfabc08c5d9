use super::values::columns_to_json;
use super::wire::{parse_body, parse_created, parse_created_collection, parse_first_page, parse_schema};
use super::{ColumnSpec, CreatedCollection, CreatedRecord, NotesApi, NotesError, RecordProperties};
use crate::config::NotesSettings;
use async_trait::async_trait;
use common::model::schema::RemoteSchema;
use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

const USER_AGENT: &str = concat!("daily-quotes/", env!("CARGO_PKG_VERSION"), " (+reqwest)");
const VERSION_HEADER: &str = "Notion-Version";

/// `reqwest` implementation of [`NotesApi`]. Every call is bounded by the
/// configured timeout; a timed-out call surfaces as [`NotesError::Transport`].
pub struct HttpNotesClient {
    http: Client,
    base_url: String,
    api_key: String,
    api_version: String,
}

impl HttpNotesClient {
    pub fn new(settings: &NotesSettings, api_key: impl Into<String>) -> Result<Self, NotesError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            api_key: api_key.into(),
            api_version: settings.api_version.clone(),
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.api_key)
            .header(VERSION_HEADER, &self.api_version)
    }

    async fn read_json(response: Response) -> Result<Value, NotesError> {
        let status = response.status();
        let text = response.text().await?;
        debug!(
            "notes response {}: {}",
            status,
            text.chars().take(500).collect::<String>()
        );

        if !status.is_success() {
            return Err(NotesError::Status {
                status: status.as_u16(),
                body: parse_body(&text),
            });
        }
        serde_json::from_str(&text).map_err(|e| NotesError::Decode(e.to_string()))
    }
}

#[async_trait]
impl NotesApi for HttpNotesClient {
    async fn fetch_schema(&self, collection_id: &str) -> Result<RemoteSchema, NotesError> {
        let url = format!("{}/databases/{}", self.base_url, collection_id);
        let response = self.authorized(self.http.get(&url)).send().await?;
        let value = Self::read_json(response).await?;
        parse_schema(&value)
    }

    async fn create_record(
        &self,
        collection_id: &str,
        properties: &RecordProperties,
    ) -> Result<CreatedRecord, NotesError> {
        let url = format!("{}/pages", self.base_url);
        let body = json!({
            "parent": { "database_id": collection_id },
            "properties": properties.to_json(),
        });
        debug!("create record payload: {body}");

        let response = self.authorized(self.http.post(&url)).json(&body).send().await?;
        let value = Self::read_json(response).await?;
        parse_created(&value)
    }

    async fn find_parent_page(&self) -> Result<Option<String>, NotesError> {
        let url = format!("{}/search", self.base_url);
        let body = json!({
            "filter": { "property": "object", "value": "page" },
            "sort": { "direction": "descending", "timestamp": "last_edited_time" },
            "page_size": 5,
        });

        let response = self.authorized(self.http.post(&url)).json(&body).send().await?;
        let value = Self::read_json(response).await?;
        parse_first_page(&value)
    }

    async fn create_collection(
        &self,
        parent_page_id: &str,
        title: &str,
        columns: &[ColumnSpec],
    ) -> Result<CreatedCollection, NotesError> {
        let url = format!("{}/databases", self.base_url);
        let body = json!({
            "parent": { "type": "page_id", "page_id": parent_page_id },
            "title": [{ "type": "text", "text": { "content": title } }],
            "properties": columns_to_json(columns),
        });
        debug!("create collection payload: {body}");

        let response = self.authorized(self.http.post(&url)).json(&body).send().await?;
        let value = Self::read_json(response).await?;
        parse_created_collection(&value)
    }

    async fn add_columns(
        &self,
        collection_id: &str,
        columns: &[ColumnSpec],
    ) -> Result<RemoteSchema, NotesError> {
        let url = format!("{}/databases/{}", self.base_url, collection_id);
        let body = json!({ "properties": columns_to_json(columns) });
        debug!("schema update payload: {body}");

        let response = self.authorized(self.http.patch(&url)).json(&body).send().await?;
        let value = Self::read_json(response).await?;
        parse_schema(&value)
    }
}
