use serde::Deserialize;
use utoipa::ToSchema;

/// Body of a summarize request.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SummaryParams {
    /// The decoded transcript text returned by the upload endpoint.
    #[serde(default)]
    pub(crate) transcript: Option<String>,
    /// Free-text directive shaping how the summary should be structured.
    #[serde(default, rename = "customInstruction")]
    pub(crate) custom_instruction: Option<String>,
}
