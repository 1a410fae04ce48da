//! Groq API client for chat completions.
//!
//! Groq exposes an OpenAI-compatible HTTP API; this module provides a thin
//! typed client over the `/chat/completions` endpoint used for summary
//! generation.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;

/// A single message in a chat completion conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request payload for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response from the chat completions endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Deserialize, Default)]
pub struct ChatUsage {
    pub prompt_tokens: Option<i32>,
    pub completion_tokens: Option<i32>,
}

/// Error body returned by the OpenAI-compatible API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Groq API client
#[derive(Debug)]
pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GroqClient {
    /// Create a new Groq client from configuration.
    ///
    /// Fails with a configuration error when `GROQ_API_KEY` is not set, so a
    /// missing credential surfaces at call time rather than at startup.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = config.groq_api_key().ok_or_else(|| {
            warn!("Failed to get Groq API key from config");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(
                    "GROQ_API_KEY environment variable is missing".to_string(),
                )),
            }
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", api_key);
        let mut auth_header = reqwest::header::HeaderValue::from_str(&auth_value).map_err(|err| {
            warn!("Failed to create authorization header value: {err:?}");
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to create authorization header value".to_string(),
                )),
            }
        })?;
        auth_header.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.groq_base_url().to_string(),
            model: config.groq_model().to_string(),
        })
    }

    /// The model identifier requests are made with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run a single chat completion request. One attempt, no retries.
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, Error> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Sending chat completion request to model {}", request.model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to send chat completion request: {e:?}");
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse chat completion response: {e:?}");
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Groq API".to_string(),
                    )),
                }
            })?;

            if let Some(usage) = &completion.usage {
                debug!(
                    "Chat completion usage: prompt_tokens={:?}, completion_tokens={:?}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            Ok(completion)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ProviderErrorBody>(&error_text) {
                Ok(body) => {
                    error!(
                        "Groq API error: status={status}, type={:?}, code={:?}",
                        body.error.error_type, body.error.code
                    );
                    body.error.message
                }
                Err(_) => {
                    error!("Groq API error: status={status}, body={error_text}");
                    error_text
                }
            };
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Provider(message)),
            })
        }
    }
}
