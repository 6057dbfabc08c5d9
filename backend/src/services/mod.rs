//! HTTP surface of the server.
//!
//! ## Sub-modules:
//! - `quotes`: the quote of the day and the schema-adaptive save endpoint.
//! - `collection`: provisioning of the quotes collection.
//! - `diagnostics`: configuration and collection access check.
//!
//! Every API resource answers `OPTIONS` preflights with `200`, and every
//! response carries permissive CORS headers so the widget can be hosted apart
//! from the API.

pub mod collection;
pub mod diagnostics;
pub mod quotes;

use actix_web::error::InternalError;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Registers every API scope on an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(json!({ "error": "Invalid query string", "details": err.to_string() }));
            InternalError::from_response(err, response).into()
        }))
        .service(quotes::configure_routes())
        .service(collection::configure_routes())
        .service(diagnostics::configure_routes());
}

pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(json!({ "error": "Invalid request body", "details": err.to_string() }));
            InternalError::from_response(err, response).into()
        })
}

pub(crate) async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub(crate) async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({ "error": "Method not allowed" }))
}
