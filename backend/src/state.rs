//! Shared server state, built once from [`AppConfig`] and handed to every worker.

use crate::config::{AppConfig, API_KEY_VAR, COLLECTION_ID_VAR};
use crate::error::SubmitError;
use crate::notes::{HttpNotesClient, NotesApi, NotesError};
use crate::submitter::SubmitSettings;
use std::sync::Arc;

pub struct AppState {
    pub config: AppConfig,
    /// Present only when an API key is configured.
    pub notes: Option<Arc<dyn NotesApi>>,
}

/// The collaborator and collection a submission writes to.
pub struct NotesTarget<'a> {
    pub api: &'a dyn NotesApi,
    pub collection_id: &'a str,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self, NotesError> {
        let notes = match &config.api_key {
            Some(key) => {
                let client = HttpNotesClient::new(&config.notes, key.clone())?;
                Some(Arc::new(client) as Arc<dyn NotesApi>)
            }
            None => None,
        };
        Ok(Self { config, notes })
    }

    pub fn submit_settings(&self) -> SubmitSettings {
        SubmitSettings {
            title_max_chars: self.config.title_max_chars,
        }
    }

    /// The notes collaborator alone, for calls that need no collection id.
    pub fn api(&self) -> Result<&dyn NotesApi, SubmitError> {
        self.notes.as_deref().ok_or_else(|| SubmitError::Configuration {
            missing: vec![API_KEY_VAR],
        })
    }

    /// Resolves the write target, naming every missing secret.
    pub fn target(&self) -> Result<NotesTarget<'_>, SubmitError> {
        match (self.notes.as_deref(), self.config.collection_id.as_ref()) {
            (Some(api), Some(collection_id)) => Ok(NotesTarget {
                api,
                collection_id: &collection_id.value,
            }),
            (api, collection_id) => {
                let mut missing = Vec::new();
                if api.is_none() {
                    missing.push(API_KEY_VAR);
                }
                if collection_id.is_none() {
                    missing.push(COLLECTION_ID_VAR);
                }
                Err(SubmitError::Configuration { missing })
            }
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State with default settings, an optional collaborator and collection id.
    pub fn for_tests(notes: Option<Arc<dyn NotesApi>>, collection_id: Option<&str>) -> Self {
        let mut config = AppConfig::from_lookup(|_| None).expect("default config");
        config.collection_id = collection_id.map(crate::config::normalize_collection_id);
        Self { config, notes }
    }
}
