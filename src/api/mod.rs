pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{app_state::AppState, health};

#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, handlers::extract_content, handlers::scrape_content),
    components(schemas(
        health::HealthResponse,
        dtos::ExtractRequest,
        dtos::ExtractResponse,
        dtos::ScrapeResponse,
        dtos::ErrorResponse
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "extraction", description = "Wikipedia article extraction")
    )
)]
pub struct ApiDoc;

/// All routes with request tracing and the Swagger UI mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/v1/extract", post(handlers::extract_content))
        .route("/v1/scrape", post(handlers::scrape_content))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
