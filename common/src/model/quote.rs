use serde::{Deserialize, Serialize};

/// A bilingual quote as shown by the widget and posted back to be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyQuote {
    pub quote_es: String,
    pub quote_en: String,
    pub author_es: String,
    pub author_en: String,
    /// ISO-8601 calendar date, `YYYY-MM-DD`.
    pub date: String,
}
