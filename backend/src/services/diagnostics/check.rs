use crate::config::{mask, IdFormat};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigSummary {
    has_api_key: bool,
    has_collection_id: bool,
    collection_id: Option<String>,
    collection_id_format: &'static str,
    timeout_secs: u64,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoteCheck {
    attempted: bool,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigReport {
    success: bool,
    config: ConfigSummary,
    remote_check: RemoteCheck,
    instructions: &'static str,
}

async fn probe(state: &AppState) -> RemoteCheck {
    let (Some(api), Some(collection_id)) = (state.notes.as_deref(), &state.config.collection_id)
    else {
        return RemoteCheck::default();
    };
    if collection_id.format == IdFormat::Invalid {
        return RemoteCheck::default();
    }

    match api.fetch_schema(&collection_id.value).await {
        Ok(schema) => RemoteCheck {
            attempted: true,
            success: true,
            url: schema.url.clone(),
            columns: Some(schema.column_names()),
            title: Some(schema.title),
            ..RemoteCheck::default()
        },
        Err(crate::notes::NotesError::Status { status, body }) => RemoteCheck {
            attempted: true,
            status: Some(status),
            error: Some(body.to_string()),
            ..RemoteCheck::default()
        },
        Err(other) => RemoteCheck {
            attempted: true,
            error: Some(other.to_string()),
            ..RemoteCheck::default()
        },
    }
}

fn instructions(summary: &ConfigSummary, remote: &RemoteCheck) -> &'static str {
    if !summary.has_api_key || !summary.has_collection_id {
        "Missing configuration: set NOTION_API_KEY and NOTION_DATABASE_ID"
    } else if summary.collection_id_format == IdFormat::Invalid.as_str() {
        "The collection id is neither a UUID, a 32 character hex id nor a collection URL"
    } else if !remote.success {
        "The collection could not be read: share it with the integration and check the key"
    } else {
        "Configuration appears valid. Try saving a quote."
    }
}

/// Actix handler for `GET /api/check-config`. Always answers `200`; problems
/// are described in the body.
pub async fn process(state: web::Data<AppState>) -> HttpResponse {
    let config = &state.config;
    let summary = ConfigSummary {
        has_api_key: config.api_key.is_some(),
        has_collection_id: config.collection_id.is_some(),
        collection_id: config.collection_id.as_ref().map(|id| mask(&id.value)),
        collection_id_format: config
            .collection_id
            .as_ref()
            .map_or("missing", |id| id.format.as_str()),
        timeout_secs: config.notes.timeout.as_secs(),
    };

    let remote_check = probe(&state).await;
    info!(
        "configuration check: key={}, collection={:?}, remote ok={}",
        summary.has_api_key, summary.collection_id, remote_check.success
    );

    HttpResponse::Ok().json(ConfigReport {
        success: true,
        instructions: instructions(&summary, &remote_check),
        config: summary,
        remote_check,
    })
}

#[cfg(test)]
mod tests {
    use crate::notes::fake::{quotes_schema, FakeNotes, Reply};
    use crate::notes::NotesApi;
    use crate::services;
    use crate::state::AppState;
    use actix_web::test as atest;
    use actix_web::{web, App};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn check(state: AppState) -> Value {
        let app = atest::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(services::configure),
        )
        .await;
        let request = atest::TestRequest::get().uri("/api/check-config").to_request();
        atest::call_and_read_body_json(&app, request).await
    }

    #[actix_web::test]
    async fn reports_missing_secrets_without_probing() {
        let body = check(AppState::for_tests(None, None)).await;

        assert_eq!(body["config"]["hasApiKey"], json!(false));
        assert_eq!(body["config"]["collectionIdFormat"], json!("missing"));
        assert_eq!(body["remoteCheck"], json!({ "attempted": false, "success": false }));
    }

    #[actix_web::test]
    async fn probes_collection_and_lists_columns() {
        let notes = Arc::new(FakeNotes::new(quotes_schema()));
        let api: Arc<dyn NotesApi> = notes.clone();
        let body = check(AppState::for_tests(
            Some(api),
            Some("https://www.notion.so/ws/Citas-0123456789abcdef0123456789abcdef"),
        ))
        .await;

        assert_eq!(body["config"]["collectionId"], json!("01234567..."));
        assert_eq!(body["config"]["collectionIdFormat"], json!("url"));
        assert_eq!(body["remoteCheck"]["success"], json!(true));
        assert_eq!(body["remoteCheck"]["title"], json!("Citas Diarias"));
        assert_eq!(body["remoteCheck"]["columns"].as_array().unwrap().len(), 5);
        assert_eq!(notes.schema_calls(), 1);
    }

    #[actix_web::test]
    async fn invalid_collection_id_is_not_probed() {
        let notes = Arc::new(FakeNotes::with_replies(
            Reply::Status(404, json!({ "code": "object_not_found" })),
            Reply::Malformed("unused"),
        ));
        let api: Arc<dyn NotesApi> = notes.clone();
        let body = check(AppState::for_tests(Some(api), Some("citas diarias"))).await;

        assert_eq!(body["config"]["collectionIdFormat"], json!("invalid"));
        assert_eq!(body["remoteCheck"]["attempted"], json!(false));
        assert_eq!(notes.schema_calls(), 0);
    }

    #[actix_web::test]
    async fn preflight_and_unknown_methods() {
        let app = atest::init_service(
            App::new()
                .app_data(web::Data::new(AppState::for_tests(None, None)))
                .wrap(services::cors_headers())
                .configure(services::configure),
        )
        .await;

        let request = atest::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/check-config")
            .to_request();
        let response = atest::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );

        let request = atest::TestRequest::delete().uri("/api/check-config").to_request();
        let response = atest::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
