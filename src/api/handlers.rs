use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use crate::{
    api::dtos::{ErrorResponse, ExtractRequest, ExtractResponse, ScrapeResponse},
    app_state::AppState,
    extractor::ExtractError,
};

#[utoipa::path(
    post,
    path = "/v1/extract",
    tag = "extraction",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Article content, or fallback content when extraction failed", body = ExtractResponse),
        (status = 400, description = "Malformed body, or missing or invalid Wikipedia URL", body = ErrorResponse)
    )
)]
pub async fn extract_content(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return invalid_request_format(rejection),
    };
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    let extraction = state.cascade.extract(&payload.url).await;
    if extraction.used_fallback {
        warn!("Serving fallback content for {}", payload.url);
    } else {
        info!(
            "Extracted {} characters from {}",
            extraction.document.len(),
            payload.url
        );
    }

    (
        StatusCode::OK,
        Json(ExtractResponse::new(payload.url, extraction)),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/v1/scrape",
    tag = "extraction",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Scraped article content", body = ScrapeResponse),
        (status = 400, description = "Malformed body, or missing or invalid Wikipedia URL", body = ErrorResponse),
        (status = 502, description = "Every scraping method failed", body = ErrorResponse)
    )
)]
pub async fn scrape_content(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return invalid_request_format(rejection),
    };
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    match state.scraper.extract(&payload.url).await {
        Ok(document) => (
            StatusCode::OK,
            Json(ScrapeResponse {
                content: document.into_text(),
            }),
        )
            .into_response(),
        Err(e @ ExtractError::InvalidUrl(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

fn invalid_request_format(rejection: JsonRejection) -> Response {
    debug!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Invalid request format".to_string(),
        }),
    )
        .into_response()
}
