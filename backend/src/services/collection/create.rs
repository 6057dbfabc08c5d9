use crate::config::normalize_collection_id;
use crate::error::SubmitError;
use crate::provisioning::{create_collection, DEFAULT_COLLECTION_TITLE};
use crate::state::AppState;
use actix_web::{rt, web, HttpResponse};
use common::requests::CreateCollectionRequest;
use common::responses::CreateCollectionResponse;

fn parse_request(body: &[u8]) -> Result<CreateCollectionRequest, SubmitError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateCollectionRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| SubmitError::Validation {
        message: format!("Invalid request body: {e}"),
        received: Default::default(),
        fields: Vec::new(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Actix handler for `POST /api/collection/create`.
///
/// The parent page comes from the body, then from the configuration, then
/// from a search of the pages shared with the integration.
pub async fn process(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, SubmitError> {
    let request = parse_request(&body)?;
    state.api()?;

    let parent = non_blank(request.parent_page_id)
        .map(|raw| normalize_collection_id(&raw).value)
        .or_else(|| state.config.parent_page_id.clone());
    let title = non_blank(request.title).unwrap_or_else(|| DEFAULT_COLLECTION_TITLE.to_string());

    let state = state.into_inner();
    let report = rt::spawn(async move {
        let api = state.api()?;
        create_collection(api, parent.as_deref(), &title).await
    })
    .await
    .map_err(|e| SubmitError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CreateCollectionResponse {
        success: true,
        message: format!(
            "Collection {} created; set NOTION_DATABASE_ID={} to save quotes into it",
            report.collection_title, report.collection_id
        ),
        collection_id: report.collection_id,
        collection: report.collection_title,
        url: report.url,
        parent_page_id: report.parent_page_id,
        columns: report.columns,
    }))
}
