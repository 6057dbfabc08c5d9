//! In-memory [`NotesApi`] for tests. Counts calls and keeps the last write.

use super::{ColumnSpec, CreatedCollection, CreatedRecord, NotesApi, NotesError, RecordProperties};
use async_trait::async_trait;
use common::model::schema::{Column, ColumnType, RemoteSchema};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub enum Reply<T> {
    Ok(T),
    Status(u16, Value),
    Malformed(&'static str),
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<T, NotesError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status, body) => Err(NotesError::Status {
                status: *status,
                body: body.clone(),
            }),
            Reply::Malformed(reason) => Err(NotesError::Decode(reason.to_string())),
        }
    }
}

pub struct FakeNotes {
    schema: Reply<RemoteSchema>,
    write: Reply<CreatedRecord>,
    schema_calls: AtomicUsize,
    write_calls: AtomicUsize,
    written: Mutex<Option<RecordProperties>>,
    parent_page: Option<String>,
    update_rejection: Option<(u16, Value)>,
    update_calls: AtomicUsize,
    create_calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
    created_under: Mutex<Option<String>>,
}

impl FakeNotes {
    pub fn new(schema: RemoteSchema) -> Self {
        Self::with_replies(
            Reply::Ok(schema),
            Reply::Ok(CreatedRecord {
                id: "abc123".to_string(),
                url: "https://notes.example/abc123".to_string(),
            }),
        )
    }

    pub fn with_replies(schema: Reply<RemoteSchema>, write: Reply<CreatedRecord>) -> Self {
        Self {
            schema,
            write,
            schema_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
            written: Mutex::new(None),
            parent_page: Some("parent-page".to_string()),
            update_rejection: None,
            update_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            created_under: Mutex::new(None),
        }
    }

    /// The page the search returns, `None` when nothing is shared.
    pub fn with_parent_page(mut self, page: Option<&str>) -> Self {
        self.parent_page = page.map(str::to_string);
        self
    }

    pub fn rejecting_updates(mut self, status: u16, body: Value) -> Self {
        self.update_rejection = Some((status, body));
        self
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Column names of the last schema update or collection creation.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn created_under(&self) -> Option<String> {
        self.created_under.lock().unwrap().clone()
    }

    fn record_request(&self, columns: &[ColumnSpec]) {
        *self.requested.lock().unwrap() = columns.iter().map(|c| c.name.clone()).collect();
    }

    pub fn schema_calls(&self) -> usize {
        self.schema_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn written(&self) -> Option<RecordProperties> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotesApi for FakeNotes {
    async fn fetch_schema(&self, _collection_id: &str) -> Result<RemoteSchema, NotesError> {
        self.schema_calls.fetch_add(1, Ordering::SeqCst);
        self.schema.produce()
    }

    async fn create_record(
        &self,
        _collection_id: &str,
        properties: &RecordProperties,
    ) -> Result<CreatedRecord, NotesError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        *self.written.lock().unwrap() = Some(properties.clone());
        self.write.produce()
    }

    async fn find_parent_page(&self) -> Result<Option<String>, NotesError> {
        Ok(self.parent_page.clone())
    }

    async fn create_collection(
        &self,
        parent_page_id: &str,
        title: &str,
        columns: &[ColumnSpec],
    ) -> Result<CreatedCollection, NotesError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.record_request(columns);
        *self.created_under.lock().unwrap() = Some(parent_page_id.to_string());
        Ok(CreatedCollection {
            id: "new-collection".to_string(),
            schema: RemoteSchema {
                title: title.to_string(),
                url: Some("https://notes.example/new-collection".to_string()),
                columns: columns
                    .iter()
                    .map(|c| Column::new(c.name.clone(), c.column_type.clone()))
                    .collect(),
            },
        })
    }

    async fn add_columns(
        &self,
        _collection_id: &str,
        columns: &[ColumnSpec],
    ) -> Result<RemoteSchema, NotesError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.record_request(columns);
        if let Some((status, body)) = &self.update_rejection {
            return Err(NotesError::Status {
                status: *status,
                body: body.clone(),
            });
        }
        let mut schema = self.schema.produce()?;
        schema
            .columns
            .extend(columns.iter().map(|c| Column::new(c.name.clone(), c.column_type.clone())));
        Ok(schema)
    }
}

/// The bilingual quotes collection: `Nombre, Cita, Autor, Cita EN, Fecha`.
pub fn quotes_schema() -> RemoteSchema {
    RemoteSchema {
        title: "Citas Diarias".to_string(),
        url: Some("https://notes.example/citas".to_string()),
        columns: vec![
            Column::new("Nombre", ColumnType::Title),
            Column::new("Cita", ColumnType::Text),
            Column::new("Autor", ColumnType::Text),
            Column::new("Cita EN", ColumnType::Text),
            Column::new("Fecha", ColumnType::Date),
        ],
    }
}
