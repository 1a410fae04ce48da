use crate::error::{Error as WebError, Operation, Result as WebResult};
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::error::{DomainErrorKind, Error as DomainError, InternalErrorKind, ValidationErrorKind};
use domain::transcripts;
use log::*;
use serde_json::json;

/// POST a transcript file and get its decoded text back.
///
/// Expects a multipart form with a file field named `transcript`. The declared
/// media type is checked before the file content is read; the 5 MB ceiling is
/// enforced both by the transport body limit and by the extraction logic.
#[utoipa::path(
    post,
    path = "/api/upload",
    responses(
        (status = 200, description = "File decoded; response carries the transcript text and filename"),
        (status = 400, description = "No file uploaded, unsupported file type, or file too large"),
        (status = 500, description = "File upload failed")
    )
)]
pub async fn upload(mut multipart: Multipart) -> WebResult<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::new(Operation::Upload, multipart_error(e)))?
    {
        if field.name() != Some("transcript") {
            continue;
        }

        let filename = field.file_name().unwrap_or("transcript.txt").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        // Declared-type check happens before the file content is read.
        if !transcripts::is_accepted_upload(&content_type, &filename) {
            return Err(WebError::new(
                Operation::Upload,
                DomainError::validation(ValidationErrorKind::UnsupportedMediaType(content_type)),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| WebError::new(Operation::Upload, multipart_error(e)))?;

        debug!("Received upload {filename:?} ({} bytes)", bytes.len());

        let uploaded = transcripts::extract(&filename, &content_type, bytes.to_vec())
            .map_err(|e| WebError::new(Operation::Upload, e))?;

        return Ok(Json(json!({
            "message": "File uploaded successfully",
            "transcript": uploaded.text,
            "filename": uploaded.filename,
        })));
    }

    Err(WebError::new(
        Operation::Upload,
        DomainError::validation(ValidationErrorKind::MissingField("transcript".to_string())),
    ))
}

/// Translates multipart read failures. A body over the transport limit maps to
/// the dedicated oversized-payload error; anything else is an internal failure.
fn multipart_error(err: MultipartError) -> DomainError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        DomainError::validation(ValidationErrorKind::PayloadTooLarge)
    } else {
        DomainError {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to read multipart body".to_string(),
            )),
        }
    }
}
