use crate::error::SubmitError;
use crate::submitter::record::parse_date;
use actix_web::{web, HttpResponse};
use chrono::{Datelike, Local, NaiveDate};
use common::model::quote::DailyQuote;
use serde::Deserialize;

/// (quote_es, author_es, quote_en, author_en)
const QUOTES: &[(&str, &str, &str, &str)] = &[
    ("El conocimiento es poder.", "Francis Bacon", "Knowledge is power.", "Francis Bacon"),
    ("Yo soy aquello que soy", "Popeye", "I am what I am", "Popeye"),
    ("Que la fuerza te acompañe", "Yoda", "May the Force be with you", "Yoda"),
    ("¡Elemental, querido Watson!", "Sherlock Holmes", "Elementary, my dear Watson", "Sherlock Holmes"),
    ("Con gran poder viene gran responsabilidad", "Tío Ben", "With great power comes great responsibility", "Uncle Ben"),
    ("Todo el mundo sospecha de alguien", "Agatha Christie", "Everyone suspects someone", "Agatha Christie"),
    ("No pienses, siente", "Bruce Lee", "Don't think, feel", "Bruce Lee"),
    ("Yo soy tu padre", "Darth Vader", "I am your father", "Darth Vader"),
    ("Después de todo, mañana es otro día", "Scarlett O'Hara", "After all, tomorrow is another day", "Scarlett O'Hara"),
    ("Volveré", "Terminator", "I'll be back", "Terminator"),
    ("E.T. teléfono casa", "E.T.", "E.T. phone home", "E.T."),
    ("Soy el rey del mundo", "Jack Dawson", "I'm the king of the world", "Jack Dawson"),
    ("La vida es como una caja de bombones", "Forrest Gump", "Life is like a box of chocolates", "Forrest Gump"),
    ("Yo solo sé que no sé nada", "Sócrates", "I know that I know nothing", "Socrates"),
    ("Pienso, luego existo", "Descartes", "I think, therefore I am", "Descartes"),
    ("Era inevitable", "Thanos", "It was inevitable", "Thanos"),
    ("Houston, tenemos un problema", "Apollo 13", "Houston, we have a problem", "Apollo 13"),
    ("Bond. James Bond", "James Bond", "Bond. James Bond", "James Bond"),
    ("Que la suerte te acompañe", "Anónimo", "May luck be with you", "Anonymous"),
];

/// Picks the quote for `date` by day of the year, so every visitor sees the same one.
pub fn quote_for_day(date: NaiveDate) -> DailyQuote {
    let index = date.ordinal() as usize % QUOTES.len();
    let (quote_es, author_es, quote_en, author_en) = QUOTES[index];
    DailyQuote {
        quote_es: quote_es.to_string(),
        quote_en: quote_en.to_string(),
        author_es: author_es.to_string(),
        author_en: author_en.to_string(),
        date: date.format("%Y-%m-%d").to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    date: Option<String>,
}

pub async fn process(query: web::Query<TodayQuery>) -> Result<HttpResponse, SubmitError> {
    let date = match query.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    Ok(HttpResponse::Ok().json(quote_for_day(date)))
}
