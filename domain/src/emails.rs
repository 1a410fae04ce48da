//! Summary delivery over transactional email.

use crate::error::{DomainErrorKind, Error, InternalErrorKind, ValidationErrorKind};
use crate::gateway::mailersend::{EmailRecipient, EmailSender, MailerSendClient, SendEmailRequest};
use log::*;
use service::config::Config;

/// Subject used when the caller does not provide one.
const DEFAULT_SUBJECT: &str = "Meeting Summary";

/// Result of a successful email dispatch. `message_id` is `None` when the
/// provider accepted the send but returned no message id, so callers can
/// tell a degraded provider response from a real id.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailDelivery {
    pub message_id: Option<String>,
    pub recipients: Vec<String>,
}

/// Normalizes a recipient list: trims surrounding whitespace and drops
/// entries that are empty after trimming. Address format is deliberately
/// not validated here; the provider rejects undeliverable addresses.
fn normalize_recipients(recipients: &[String]) -> Vec<String> {
    recipients
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect()
}

/// Sends `body` to `recipients`, returning the provider-assigned message id
/// and the normalized recipient list.
///
/// Fails with a validation error when the recipient list or body is empty,
/// before any provider call is made. The sender identity is drawn from the
/// `SMTP_USER` configuration value.
pub async fn send_summary(
    config: &Config,
    recipients: &[String],
    subject: Option<String>,
    body: &str,
) -> Result<EmailDelivery, Error> {
    let recipients = normalize_recipients(recipients);
    if recipients.is_empty() {
        return Err(Error::validation(ValidationErrorKind::MissingField(
            "recipients".to_string(),
        )));
    }
    if body.is_empty() {
        return Err(Error::validation(ValidationErrorKind::MissingField(
            "summary".to_string(),
        )));
    }

    let sender = config.smtp_user().ok_or_else(|| {
        error!("Sender address not configured");
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(
                "SMTP_USER environment variable is missing".to_string(),
            )),
        }
    })?;

    let mailersend_client = MailerSendClient::new(config)?;

    let subject = subject
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

    info!(
        "Dispatching summary email to {} recipients with subject {subject:?}",
        recipients.len()
    );

    let request = SendEmailRequest {
        from: EmailSender { email: sender },
        to: recipients
            .iter()
            .map(|email| EmailRecipient {
                email: email.clone(),
            })
            .collect(),
        subject,
        text: body.to_string(),
    };

    let response = mailersend_client.send_email(request).await?;

    if response.message_id.is_none() {
        warn!("Provider accepted the email but returned no message id");
    }

    Ok(EmailDelivery {
        message_id: response.message_id,
        recipients,
    })
}
