use crate::error::SubmitError;
use crate::provisioning::add_missing_columns;
use crate::state::AppState;
use actix_web::{rt, web, HttpResponse};
use common::responses::SetupCollectionResponse;

/// Actix handler for `POST /api/collection/setup`.
pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, SubmitError> {
    state.target()?;

    let state = state.into_inner();
    let report = rt::spawn(async move {
        let target = state.target()?;
        add_missing_columns(target.api, target.collection_id).await
    })
    .await
    .map_err(|e| SubmitError::Internal(e.to_string()))??;

    let message = if report.added.is_empty() {
        format!("{} already has every quote column", report.collection_title)
    } else {
        format!(
            "Added {} columns to {}",
            report.added.len(),
            report.collection_title
        )
    };
    Ok(HttpResponse::Ok().json(SetupCollectionResponse {
        success: true,
        message,
        collection: report.collection_title,
        url: report.url,
        columns: report.columns,
        added_columns: report.added,
    }))
}
