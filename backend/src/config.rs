//! Process configuration, resolved once from the environment at start-up.
//!
//! The two notes-service secrets are optional here: a server without them still
//! starts and serves the widget, and save requests answer with a configuration
//! error naming what is missing.

use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_VAR: &str = "NOTION_API_KEY";
pub const COLLECTION_ID_VAR: &str = "NOTION_DATABASE_ID";
pub const COLLECTION_ID_ALIAS_VAR: &str = "NOTION_PAGE_ID";
pub const PARENT_PAGE_VAR: &str = "NOTION_PARENT_PAGE_ID";

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
const DEFAULT_API_VERSION: &str = "2022-06-28";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TITLE_MAX_CHARS: usize = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// How the configured collection id was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFormat {
    Uuid,
    Hex,
    /// Extracted from a pasted collection URL.
    Url,
    /// Matches no known form; passed through unchanged.
    Invalid,
}

impl IdFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            IdFormat::Uuid => "uuid",
            IdFormat::Hex => "hex",
            IdFormat::Url => "url",
            IdFormat::Invalid => "invalid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionId {
    pub value: String,
    pub format: IdFormat,
}

/// Outbound notes API settings.
#[derive(Debug, Clone)]
pub struct NotesSettings {
    pub base_url: String,
    pub api_version: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub api_key: Option<String>,
    pub collection_id: Option<CollectionId>,
    pub parent_page_id: Option<String>,
    pub notes: NotesSettings,
    pub title_max_chars: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let collection_id = get(COLLECTION_ID_VAR)
            .or_else(|| get(COLLECTION_ID_ALIAS_VAR))
            .map(|raw| normalize_collection_id(&raw));

        Ok(Self {
            host: get("QUOTES_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var("QUOTES_PORT", get("QUOTES_PORT"), 8080)?,
            open_browser: parse_bool("QUOTES_OPEN_BROWSER", get("QUOTES_OPEN_BROWSER"))?,
            api_key: get(API_KEY_VAR),
            collection_id,
            parent_page_id: get(PARENT_PAGE_VAR).map(|raw| normalize_collection_id(&raw).value),
            notes: NotesSettings {
                base_url: get("NOTES_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                api_version: get("NOTES_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                timeout: Duration::from_secs(parse_var(
                    "NOTES_TIMEOUT_SECS",
                    get("NOTES_TIMEOUT_SECS"),
                    DEFAULT_TIMEOUT_SECS,
                )?),
            },
            title_max_chars: parse_var(
                "QUOTES_TITLE_MAX_CHARS",
                get("QUOTES_TITLE_MAX_CHARS"),
                DEFAULT_TITLE_MAX_CHARS,
            )?,
        })
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_bool(var: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::InvalidValue {
            var,
            value: value.unwrap_or_default(),
            reason: "expected true or false".to_string(),
        }),
    }
}

fn uuid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
            .expect("static regex")
    })
}

fn hex_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[0-9a-f]{32}").expect("static regex"))
}

/// Accepts a hyphenated UUID, a bare 32-hex id, or a URL that contains either.
pub fn normalize_collection_id(raw: &str) -> CollectionId {
    let raw = raw.trim();
    let is_exact = |re: &Regex| re.find(raw).is_some_and(|m| m.as_str() == raw);

    if is_exact(uuid_re()) {
        return CollectionId {
            value: raw.to_string(),
            format: IdFormat::Uuid,
        };
    }
    if is_exact(hex_re()) {
        return CollectionId {
            value: raw.to_string(),
            format: IdFormat::Hex,
        };
    }

    // Collection URLs end in the id, optionally followed by a query string.
    let path = raw.split(['?', '#']).next().unwrap_or(raw);
    let extracted = uuid_re()
        .find_iter(path)
        .last()
        .or_else(|| hex_re().find_iter(path).last());
    match extracted {
        Some(found) => CollectionId {
            value: found.as_str().to_string(),
            format: IdFormat::Url,
        },
        None => CollectionId {
            value: raw.to_string(),
            format: IdFormat::Invalid,
        },
    }
}

/// Shortens an identifier for logs and diagnostics.
pub fn mask(value: &str) -> String {
    let prefix: String = value.chars().take(8).collect();
    format!("{prefix}...")
}
