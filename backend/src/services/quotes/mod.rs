//! # Quote Service Module
//!
//! Routes under `/api/quotes`:
//!
//! *   **`POST /save`** (`save::process`): validates a bilingual quote, reads the
//!     target collection's schema, maps the quote onto its columns and creates
//!     one record. Answers `200` with the record id, URL and the mapping used,
//!     `400` with diagnostics when the input or the remote rejects it, `500`
//!     when the server is not configured.
//!
//! *   **`GET /today`** (`today::process`): the quote of the day, optionally for
//!     a given `?date=YYYY-MM-DD`.

mod save;
mod today;

use super::{method_not_allowed, preflight};
use actix_web::http::Method;
use actix_web::web::{get, post, resource, route, scope, to};
use actix_web::Scope;

const API_PATH: &str = "/api/quotes";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .service(
            resource("/save")
                .route(post().to(save::process))
                .route(route().method(Method::OPTIONS).to(preflight))
                .default_service(to(method_not_allowed)),
        )
        .service(
            resource("/today")
                .route(get().to(today::process))
                .route(route().method(Method::OPTIONS).to(preflight))
                .default_service(to(method_not_allowed)),
        )
}
