use crate::controller::{
    email_controller, health_check_controller, summary_controller, transcript_controller,
};
use crate::{params, AppState};
use axum::extract::DefaultBodyLimit;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use domain::transcripts::MAX_TRANSCRIPT_BYTES;
use tower_http::cors::CorsLayer;

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meeting Summarizer API"
    ),
    paths(
        transcript_controller::upload,
        summary_controller::summarize,
        email_controller::send_email,
        health_check_controller::health_check,
    ),
    components(
        schemas(
            params::summary::SummaryParams,
            params::email::EmailParams,
        )
    ),
    tags(
        (name = "meeting_summarizer", description = "Transcript upload, AI summarization and summary email delivery")
    )
)]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state);

    Router::new()
        .merge(transcript_routes(app_state.clone()))
        .merge(summary_routes(app_state.clone()))
        .merge(email_routes(app_state))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors)
}

fn transcript_routes(app_state: AppState) -> Router {
    // Transport-level ceiling sits just above the application-level 5 MB check
    // so multipart framing overhead does not trip it first.
    Router::new()
        .route("/api/upload", post(transcript_controller::upload))
        .layer(DefaultBodyLimit::max(MAX_TRANSCRIPT_BYTES + 64 * 1024))
        .with_state(app_state)
}

fn summary_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summary_controller::summarize))
        .with_state(app_state)
}

fn email_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/send-email", post(email_controller::send_email))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn cors_layer(app_state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}
