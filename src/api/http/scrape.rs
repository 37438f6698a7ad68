use axum::{Json, extract::State, http::StatusCode, response::IntoResponse, response::Response};

use crate::{
    app::state::AppState,
    dto::scrape::ScrapeRequest,
    error::AppError,
    usecases::scrape::{ScrapeOutcome, ScrapeService},
};

pub async fn scrape_handle(
    State(state): State<AppState>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Response, AppError> {
    let outcome = ScrapeService::scrape(&state.fetcher, &req.url).await?;
    let response = match outcome {
        ScrapeOutcome::Scraped(record) => Json(record).into_response(),
        // The fallback body still carries a pinnable record.
        ScrapeOutcome::Failed(failure) => {
            (StatusCode::BAD_GATEWAY, Json(failure)).into_response()
        }
    };
    Ok(response)
}
