//! Configuration diagnostics under `/api/check-config`.
//!
//! Reports which secrets are set, how the collection id was written, and, when
//! possible, whether the collection can be read with the configured key.

mod check;

use super::{method_not_allowed, preflight};
use actix_web::http::Method;
use actix_web::web::{get, resource, route, to};
use actix_web::Resource;

const API_PATH: &str = "/api/check-config";

pub fn configure_routes() -> Resource {
    resource(API_PATH)
        .route(get().to(check::process))
        .route(route().method(Method::OPTIONS).to(preflight))
        .default_service(to(method_not_allowed))
}
