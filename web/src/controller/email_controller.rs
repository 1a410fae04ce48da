use crate::error::{Error as WebError, Operation, Result as WebResult};
use crate::params::email::EmailParams;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::emails;
use domain::error::{Error as DomainError, ValidationErrorKind};
use serde_json::json;

/// POST a summary and a recipient list; emails the summary out.
#[utoipa::path(
    post,
    path = "/api/send-email",
    request_body = EmailParams,
    responses(
        (status = 200, description = "Email dispatched; response carries the provider message id and the normalized recipient list"),
        (status = 400, description = "Recipients and summary are required"),
        (status = 500, description = "Email dispatch failed")
    )
)]
pub async fn send_email(
    State(app_state): State<AppState>,
    Json(params): Json<EmailParams>,
) -> WebResult<impl IntoResponse> {
    let recipients = params.recipients.unwrap_or_default();
    let summary = params.summary.unwrap_or_default();

    // Presence check before any provider call is made.
    if recipients.is_empty() || summary.is_empty() {
        return Err(WebError::new(
            Operation::SendEmail,
            DomainError::validation(ValidationErrorKind::MissingField(
                "recipients, summary".to_string(),
            )),
        ));
    }

    let delivery = emails::send_summary(&app_state.config, &recipients, params.subject, &summary)
        .await
        .map_err(|e| WebError::new(Operation::SendEmail, e))?;

    Ok(Json(json!({
        "message": "Email sent successfully",
        "messageId": delivery.message_id,
        "recipients": delivery.recipients,
    })))
}
