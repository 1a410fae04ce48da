//! Transcript text extraction from uploaded files.
//!
//! Uploads stay in memory; extraction only validates the declared media type
//! and size ceiling, then decodes the bytes as UTF-8.

use crate::error::{Error, ValidationErrorKind};
use log::*;

/// Maximum accepted transcript upload size in bytes (5 MB).
pub const MAX_TRANSCRIPT_BYTES: usize = 5 * 1024 * 1024;

/// Declared media types accepted for transcript uploads.
pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = ["text/plain", "text/markdown"];

/// A successfully decoded transcript upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedTranscript {
    pub text: String,
    pub filename: String,
}

/// Whether an upload with the given declared media type and filename is accepted.
/// Markdown files are frequently uploaded with a generic declared type, so a
/// `.md` extension is accepted regardless of the declared type.
pub fn is_accepted_upload(content_type: &str, filename: &str) -> bool {
    ACCEPTED_MEDIA_TYPES.contains(&content_type) || filename.ends_with(".md")
}

/// Validates and decodes an uploaded transcript file.
///
/// Checks run in order: declared media type, size ceiling, UTF-8 decoding.
/// The size check runs before decoding so oversized payloads are never decoded.
pub fn extract(filename: &str, content_type: &str, bytes: Vec<u8>) -> Result<UploadedTranscript, Error> {
    if !is_accepted_upload(content_type, filename) {
        warn!("Rejected upload {filename:?} with media type {content_type:?}");
        return Err(Error::validation(ValidationErrorKind::UnsupportedMediaType(
            content_type.to_string(),
        )));
    }

    if bytes.len() > MAX_TRANSCRIPT_BYTES {
        warn!(
            "Rejected upload {filename:?}: {} bytes exceeds the {MAX_TRANSCRIPT_BYTES} byte ceiling",
            bytes.len()
        );
        return Err(Error::validation(ValidationErrorKind::PayloadTooLarge));
    }

    let text = String::from_utf8(bytes).map_err(|e| {
        warn!("Rejected upload {filename:?}: not valid UTF-8");
        Error {
            source: Some(Box::new(e)),
            error_kind: crate::error::DomainErrorKind::Validation(
                ValidationErrorKind::InvalidEncoding,
            ),
        }
    })?;

    debug!("Decoded transcript {filename:?} ({} chars)", text.len());

    Ok(UploadedTranscript {
        text,
        filename: filename.to_string(),
    })
}
