//! AI summary generation for meeting transcripts.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, ValidationErrorKind};
use crate::gateway::groq::{ChatCompletionRequest, ChatMessage, GroqClient};
use log::*;
use service::config::Config;

/// Fixed system role message framing every summarization request.
const SYSTEM_PROMPT: &str = "You are a professional meeting summarizer. \
    Provide clear, structured summaries based on the user's specific instructions.";

/// Output token ceiling for a generated summary.
const MAX_SUMMARY_TOKENS: u32 = 500;

/// Low temperature keeps summaries structured and deterministic.
const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Builds the user prompt: the instruction is stated first, the transcript
/// is appended verbatim afterward.
fn build_prompt(transcript: &str, instruction: &str) -> String {
    format!(
        "Please summarize the following meeting transcript according to these instructions: \"{instruction}\"\n\n\
         Transcript:\n{transcript}\n\nSummary:"
    )
}

/// Generates a summary of `transcript` shaped by `instruction`.
///
/// A single attempt is made against the configured chat completions API; the
/// caller may re-invoke on failure. Fails with a validation error when either
/// argument is empty, before any provider call is made.
pub async fn generate(config: &Config, transcript: &str, instruction: &str) -> Result<String, Error> {
    if transcript.is_empty() || instruction.is_empty() {
        return Err(Error::validation(ValidationErrorKind::MissingField(
            "transcript, customInstruction".to_string(),
        )));
    }

    debug!(
        "Generating summary: transcript length {}, instruction {:?}",
        transcript.len(),
        instruction
    );

    let groq = GroqClient::new(config)?;

    let request = ChatCompletionRequest {
        model: groq.model().to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(transcript, instruction)),
        ],
        max_tokens: MAX_SUMMARY_TOKENS,
        temperature: SUMMARY_TEMPERATURE,
    };

    let completion = groq.chat_completion(request).await?;

    let summary = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| {
            warn!("Chat completion response contained no summary content");
            Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                    "No summary content received from Groq API".to_string(),
                )),
            }
        })?;

    info!("Generated summary ({} chars)", summary.len());

    Ok(summary)
}
