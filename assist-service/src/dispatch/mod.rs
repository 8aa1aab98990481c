//! Action routing: one named operation per request, each a thin composition
//! of prompt template + model call + extraction.

pub mod documents;
pub mod email;
pub mod insights;
pub mod media;
pub mod quotes;

use crate::extraction::ExtractError;
use crate::models::FileAttachment;
use crate::services::providers::ProviderError;
use crate::startup::AppState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Error type for a dispatched action.
///
/// Every variant surfaces to the client as the same `500 {"error": msg}`
/// envelope; callers are not given distinct error codes.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unrecognized action: {0}")]
    UnknownAction(String),

    #[error("no file provided")]
    MissingFile,

    #[error("uploaded file is empty")]
    EmptyFile,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("model call failed: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Route one action to its handler.
///
/// Unknown names fail here with the offending name in the message; they never
/// reach a handler.
pub async fn run(
    state: &AppState,
    action: &str,
    payload: Value,
    file: Option<FileAttachment>,
) -> Result<Value, DispatchError> {
    match action {
        "generateSubjectLines" => email::subject_lines(state, &payload).await,
        "generatePreheaders" => email::preheaders(state, &payload).await,
        "generateEmailBody" => email::email_body(state, &payload).await,
        "generateHomeQuoteProse" => quotes::home_quote_prose(state, &payload).await,
        "generateAutoQuoteProse" => quotes::auto_quote_prose(state, &payload).await,
        "generateHeroImage" => media::hero_image(state, &payload).await,
        "generateVideo" => media::start_video(state, &payload).await,
        "getVideosOperation" => media::poll_video(state, &payload).await,
        "generatePromptFromPdf" => documents::prompt_from_pdf(state, file).await,
        "extractQuoteFromPdf" => documents::quote_from_pdf(state, file).await,
        "extractAutoQuoteFromPdf" => documents::auto_quote_from_pdf(state, file).await,
        "extractRenewalFromPdf" => documents::renewal_from_pdf(state, file).await,
        "extractNewPolicyFromPdf" => documents::new_policy_from_pdf(state, file).await,
        "extractCancellationsFromPdf" => documents::cancellations_from_pdf(state, file).await,
        "extractReceiptInfoFromPdf" => documents::receipt_from_pdf(state, file).await,
        "extractReceiptInfoFromText" => documents::receipt_from_text(state, &payload).await,
        "extractChangeInfoFromText" => documents::change_from_text(state, &payload).await,
        "generateOpportunities" => insights::opportunities(state, &payload).await,
        "generateRateChangeExplanation" => insights::rate_change_explanation(state, &payload).await,
        other => Err(DispatchError::UnknownAction(other.to_string())),
    }
}

/// Read a string payload field, treating anything missing as empty.
///
/// Payload fields are deliberately read optimistically; optional fields that
/// are absent render as empty strings in prompt templates.
pub(crate) fn text_field<'a>(payload: &'a Value, key: &str) -> &'a str {
    payload.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Read a numeric payload field, accepting numbers or numeric strings.
pub(crate) fn number_field(payload: &Value, key: &str) -> f64 {
    match payload.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.parse().unwrap_or_default(),
        _ => 0.0,
    }
}

/// Append the caller's free-text customization only when present and
/// non-empty, keeping the template deterministic otherwise.
pub(crate) fn append_custom_instructions(prompt: &mut String, payload: &Value) {
    let custom = text_field(payload, "customInstructions");
    if !custom.is_empty() {
        prompt.push_str("\nAdditional instructions: ");
        prompt.push_str(custom);
    }
}

/// Enforce the attachment invariant for file actions before any model call.
pub(crate) fn require_file(file: Option<FileAttachment>) -> Result<FileAttachment, DispatchError> {
    let file = file.ok_or(DispatchError::MissingFile)?;
    if file.content.is_empty() {
        return Err(DispatchError::EmptyFile);
    }
    Ok(file)
}
