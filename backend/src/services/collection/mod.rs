//! # Collection Setup Module
//!
//! Routes under `/api/collection`:
//!
//! *   **`POST /setup`** (`setup::process`): adds the quote columns the
//!     configured collection lacks. Existing columns are left as they are.
//!
//! *   **`POST /create`** (`create::process`): creates a new quotes collection
//!     under a page shared with the integration. The body may name the parent
//!     page and the title; an empty body uses the configured parent page, or
//!     the most recently edited shared page.

mod create;
mod setup;

use super::{method_not_allowed, preflight};
use actix_web::http::Method;
use actix_web::web::{post, resource, route, scope, to};
use actix_web::Scope;

const API_PATH: &str = "/api/collection";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .service(
            resource("/setup")
                .route(post().to(setup::process))
                .route(route().method(Method::OPTIONS).to(preflight))
                .default_service(to(method_not_allowed)),
        )
        .service(
            resource("/create")
                .route(post().to(create::process))
                .route(route().method(Method::OPTIONS).to(preflight))
                .default_service(to(method_not_allowed)),
        )
}
