//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries: provider gateways raise domain errors, and `web` uses the various
/// `error_kind`s to return appropriate HTTP status codes and messages to the client
/// without ever inspecting provider-specific error types.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Validation(ValidationErrorKind),
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of caller-input errors. These always map
/// to client errors at the web layer and are raised before any provider call is made.
#[derive(Debug, PartialEq)]
pub enum ValidationErrorKind {
    /// A required field was absent or empty. Carries the field name(s).
    MissingField(String),
    /// The uploaded payload exceeded the allowed size ceiling.
    PayloadTooLarge,
    /// The declared media type of an upload is not accepted.
    UnsupportedMediaType(String),
    /// The uploaded bytes were not valid UTF-8.
    InvalidEncoding,
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// A required credential or setting is absent from the running configuration.
    /// Carries a description of what is missing. An operator fault, not a caller fault.
    Config(String),
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    /// The provider rejected the request; carries the provider's own error message.
    Provider(String),
    Other(String),
}

impl Error {
    /// Convenience constructor for validation failures, which never carry a source.
    pub fn validation(kind: ValidationErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Validation(kind),
        }
    }

    /// A human-readable description of the failure, suitable for error response
    /// `details` fields. Prefers the provider's own message where one exists.
    pub fn detail(&self) -> String {
        match &self.error_kind {
            DomainErrorKind::Validation(kind) => match kind {
                ValidationErrorKind::MissingField(fields) => {
                    format!("Missing required field(s): {fields}")
                }
                ValidationErrorKind::PayloadTooLarge => "Payload too large".to_string(),
                ValidationErrorKind::UnsupportedMediaType(media_type) => {
                    format!("Unsupported media type: {media_type}")
                }
                ValidationErrorKind::InvalidEncoding => "File is not valid UTF-8".to_string(),
            },
            DomainErrorKind::Internal(kind) => match kind {
                InternalErrorKind::Config(msg) => msg.clone(),
                InternalErrorKind::Other(msg) => msg.clone(),
            },
            DomainErrorKind::External(kind) => match kind {
                ExternalErrorKind::Network => match &self.source {
                    Some(source) => source.to_string(),
                    None => "Network error while calling provider".to_string(),
                },
                ExternalErrorKind::Provider(msg) => msg.clone(),
                ExternalErrorKind::Other(msg) => msg.clone(),
            },
        }
    }

    /// Renders the full error chain for diagnostic output, outermost first.
    pub fn diagnostic_chain(&self) -> String {
        let mut rendered = format!("{self:?}");
        let mut source = StdError::source(self);
        while let Some(err) = source {
            rendered.push_str(&format!("\ncaused by: {err}"));
            source = err.source();
        }
        rendered
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_prefers_provider_message() {
        let err = Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Provider(
                "Invalid API Key".to_string(),
            )),
        };
        assert_eq!(err.detail(), "Invalid API Key");
    }

    #[test]
    fn test_detail_for_missing_config() {
        let err = Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(
                "GROQ_API_KEY environment variable is missing".to_string(),
            )),
        };
        assert_eq!(err.detail(), "GROQ_API_KEY environment variable is missing");
    }

    #[test]
    fn test_diagnostic_chain_includes_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = Error {
            source: Some(Box::new(io_err)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
        };
        let chain = err.diagnostic_chain();
        assert!(chain.contains("Network"));
        assert!(chain.contains("caused by: connection reset"));
    }
}
