use serde::Deserialize;
use utoipa::ToSchema;

/// Body of a send-email request.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct EmailParams {
    /// Ordered list of recipient addresses. Format is not validated server-side.
    #[serde(default)]
    pub(crate) recipients: Option<Vec<String>>,
    /// Optional subject; defaults to "Meeting Summary" when absent.
    #[serde(default)]
    pub(crate) subject: Option<String>,
    /// The summary text to use as the email body.
    #[serde(default)]
    pub(crate) summary: Option<String>,
}
