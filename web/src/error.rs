use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{DomainErrorKind, Error as DomainError, ValidationErrorKind};

use log::{error, warn};

pub type Result<T> = core::result::Result<T, Error>;

/// The boundary operation a failure occurred in. Error bodies are
/// operation-specific, so the wrapped domain error alone is not enough
/// to render a response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Upload,
    Summarize,
    SendEmail,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::Upload => write!(f, "Upload"),
            Operation::Summarize => write!(f, "Summarization"),
            Operation::SendEmail => write!(f, "Email sending"),
        }
    }
}

/// Web-layer error: a domain error tagged with the operation it occurred in.
/// This is the only place in the system where HTTP status codes and error
/// response bodies are produced.
#[derive(Debug)]
pub struct Error {
    operation: Operation,
    source: DomainError,
    include_diagnostics: bool,
}

impl Error {
    pub fn new(operation: Operation, source: DomainError) -> Self {
        Self {
            operation,
            source,
            include_diagnostics: false,
        }
    }

    /// Enables the `stack` field on server error bodies. Callers gate this on
    /// the runtime environment so diagnostics never leak outside development.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.include_diagnostics = enabled;
        self
    }

    fn validation_message(&self, kind: &ValidationErrorKind) -> String {
        match kind {
            ValidationErrorKind::PayloadTooLarge => {
                "File too large. Max size is 5MB.".to_string()
            }
            ValidationErrorKind::UnsupportedMediaType(_) => {
                "Only text files are allowed".to_string()
            }
            ValidationErrorKind::InvalidEncoding => self.source.detail(),
            ValidationErrorKind::MissingField(_) => match self.operation {
                Operation::Upload => "No file uploaded".to_string(),
                Operation::Summarize => {
                    "Transcript and custom instruction are required".to_string()
                }
                Operation::SendEmail => "Recipients and summary are required".to_string(),
            },
        }
    }

    fn failure_body(&self) -> serde_json::Value {
        match self.operation {
            Operation::Upload => json!({ "error": "File upload failed" }),
            Operation::Summarize => {
                let mut body = json!({
                    "error": "Failed to generate summary",
                    "details": self.source.detail(),
                });
                if self.include_diagnostics {
                    body["stack"] = json!(self.source.diagnostic_chain());
                }
                body
            }
            Operation::SendEmail => json!({ "error": self.source.detail() }),
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self.source.error_kind {
            DomainErrorKind::Validation(kind) => {
                let message = self.validation_message(kind);
                warn!("{} rejected: {message}", self.operation);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            _ => {
                error!("{} error: {:?}", self.operation, self.source);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(self.failure_body())).into_response()
            }
        }
    }
}
