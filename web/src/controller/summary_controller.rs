use crate::error::{Error as WebError, Operation, Result as WebResult};
use crate::params::summary::SummaryParams;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::error::{Error as DomainError, ValidationErrorKind};
use domain::summaries;
use log::*;
use serde_json::json;

/// POST a transcript and an instruction; returns the generated summary.
#[utoipa::path(
    post,
    path = "/api/summarize",
    request_body = SummaryParams,
    responses(
        (status = 200, description = "Summary generated"),
        (status = 400, description = "Transcript and custom instruction are required"),
        (status = 500, description = "Summary generation failed; body carries details and, in development, the error chain")
    )
)]
pub async fn summarize(
    State(app_state): State<AppState>,
    Json(params): Json<SummaryParams>,
) -> WebResult<impl IntoResponse> {
    let transcript = params.transcript.unwrap_or_default();
    let instruction = params.custom_instruction.unwrap_or_default();

    // Presence check before any provider call is made.
    if transcript.is_empty() || instruction.is_empty() {
        return Err(WebError::new(
            Operation::Summarize,
            DomainError::validation(ValidationErrorKind::MissingField(
                "transcript, customInstruction".to_string(),
            )),
        ));
    }

    debug!(
        "Summarize request: transcript length {}, instruction {:?}",
        transcript.len(),
        instruction
    );

    let summary = summaries::generate(&app_state.config, &transcript, &instruction)
        .await
        .map_err(|e| {
            WebError::new(Operation::Summarize, e)
                .with_diagnostics(app_state.config.diagnostics_enabled())
        })?;

    Ok(Json(json!({ "summary": summary })))
}
