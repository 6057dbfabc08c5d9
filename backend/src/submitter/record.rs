use crate::error::SubmitError;
use chrono::NaiveDate;
use common::requests::SaveQuoteRequest;
use std::collections::BTreeMap;

/// A validated quote, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    pub primary_text: String,
    pub primary_author: Option<String>,
    pub secondary_text: Option<String>,
    pub secondary_author: Option<String>,
    pub occurred_on: NaiveDate,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, SubmitError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| SubmitError::Validation {
        message: "Invalid date, expected YYYY-MM-DD".to_string(),
        received: BTreeMap::from([("date", true)]),
        fields: vec!["date"],
    })
}

impl TryFrom<SaveQuoteRequest> for QuoteRecord {
    type Error = SubmitError;

    fn try_from(request: SaveQuoteRequest) -> Result<Self, Self::Error> {
        let quote_es = present(request.quote_es);
        let quote_en = present(request.quote_en);
        let date = present(request.date);

        let received = BTreeMap::from([
            ("quote_es", quote_es.is_some()),
            ("quote_en", quote_en.is_some()),
            ("date", date.is_some()),
        ]);

        let (Some(primary_text), Some(secondary_text), Some(date)) = (quote_es, quote_en, date)
        else {
            let fields = received
                .iter()
                .filter(|(_, seen)| !**seen)
                .map(|(name, _)| *name)
                .collect();
            return Err(SubmitError::Validation {
                message: "Missing required fields".to_string(),
                received,
                fields,
            });
        };

        Ok(Self {
            primary_text,
            primary_author: present(request.author_es),
            secondary_text: Some(secondary_text),
            secondary_author: present(request.author_en),
            occurred_on: parse_date(&date)?,
        })
    }
}
