use crate::error::SubmitError;
use crate::state::AppState;
use crate::submitter::record::QuoteRecord;
use crate::submitter::submit;
use actix_web::{rt, web, HttpResponse};
use common::requests::SaveQuoteRequest;
use common::responses::SaveQuoteResponse;

/// Actix handler for `POST /api/quotes/save`.
///
/// Validation and the configuration check happen before anything leaves the
/// process. The submission itself runs on its own task so that a client
/// hanging up does not cut the outbound calls short.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SaveQuoteRequest>,
) -> Result<HttpResponse, SubmitError> {
    let record = QuoteRecord::try_from(payload.into_inner())?;
    state.target()?;

    let state = state.into_inner();
    let receipt = rt::spawn(async move {
        let target = state.target()?;
        submit(
            target.api,
            target.collection_id,
            &record,
            &state.submit_settings(),
        )
        .await
    })
    .await
    .map_err(|e| SubmitError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(SaveQuoteResponse {
        success: true,
        message: format!("Quote saved to {}", receipt.collection_title),
        page_id: receipt.record_id,
        url: receipt.url,
        collection: receipt.collection_title,
        mapping: receipt.mapping,
        properties_used: receipt.properties_used,
    }))
}
