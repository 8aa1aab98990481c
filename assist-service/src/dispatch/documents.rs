//! Document understanding actions: structured extraction from uploaded PDFs
//! and from pasted text.
//!
//! Every PDF action requires a non-empty attachment and fails before any
//! model call when one is missing.

use super::{require_file, text_field, DispatchError};
use crate::extraction::json::extract_json;
use crate::models::FileAttachment;
use crate::startup::AppState;
use serde_json::Value;

const QUOTE_PROMPT: &str = "Extract the key details from this insurance quote document. \
    Return a JSON object with the fields: customerName, policyType, premium, effectiveDate, \
    and coverages (an array of {name, limit}). Respond with JSON only, inside a json code block.";

const AUTO_QUOTE_PROMPT: &str = "Extract the key details from this auto insurance quote document. \
    Return a JSON object with the fields: customerName, vehicle, premium, effectiveDate, \
    and coverages (an array of {name, limit}). Respond with JSON only, inside a json code block.";

const RENEWAL_PROMPT: &str = "Extract the key details from this insurance renewal document. \
    Return a JSON object with the fields: customerName, policyNumber, policyType, renewalDate, \
    previousPremium, and newPremium. Respond with JSON only, inside a json code block.";

const NEW_POLICY_PROMPT: &str = "Extract the key details from this new insurance policy document. \
    Return a JSON object with the fields: customerName, policyNumber, policyType, premium, \
    and effectiveDate. Respond with JSON only, inside a json code block.";

const CANCELLATIONS_PROMPT: &str = "List every policy cancellation described in this document. \
    Return a JSON array with one object per cancellation, each with the fields: customerName, \
    policyNumber, cancellationDate, and reason. If the document describes no cancellations, \
    return an empty JSON array. Respond with JSON only, inside a json code block.";

const RECEIPT_PROMPT: &str = "Extract the payment details from this receipt. \
    Return a JSON object with the fields: customerName, amount, paymentDate, paymentMethod, \
    and policyNumber. Respond with JSON only, inside a json code block.";

const IMAGE_PROMPT_PROMPT: &str = "Read this document and write one short, vivid prompt for an \
    image generation model that would suit a marketing email about it. \
    Return a JSON object with a single field: prompt. Respond with JSON only, inside a json code block.";

async fn extract_from_pdf(
    state: &AppState,
    prompt: &str,
    file: Option<FileAttachment>,
) -> Result<Value, DispatchError> {
    let file = require_file(file)?;
    let completion = state
        .document_provider
        .generate(prompt, Some(&file))
        .await?;
    Ok(extract_json(&completion)?)
}

pub async fn quote_from_pdf(
    state: &AppState,
    file: Option<FileAttachment>,
) -> Result<Value, DispatchError> {
    extract_from_pdf(state, QUOTE_PROMPT, file).await
}

pub async fn auto_quote_from_pdf(
    state: &AppState,
    file: Option<FileAttachment>,
) -> Result<Value, DispatchError> {
    extract_from_pdf(state, AUTO_QUOTE_PROMPT, file).await
}

pub async fn renewal_from_pdf(
    state: &AppState,
    file: Option<FileAttachment>,
) -> Result<Value, DispatchError> {
    extract_from_pdf(state, RENEWAL_PROMPT, file).await
}

pub async fn new_policy_from_pdf(
    state: &AppState,
    file: Option<FileAttachment>,
) -> Result<Value, DispatchError> {
    extract_from_pdf(state, NEW_POLICY_PROMPT, file).await
}

pub async fn cancellations_from_pdf(
    state: &AppState,
    file: Option<FileAttachment>,
) -> Result<Value, DispatchError> {
    extract_from_pdf(state, CANCELLATIONS_PROMPT, file).await
}

pub async fn receipt_from_pdf(
    state: &AppState,
    file: Option<FileAttachment>,
) -> Result<Value, DispatchError> {
    extract_from_pdf(state, RECEIPT_PROMPT, file).await
}

pub async fn prompt_from_pdf(
    state: &AppState,
    file: Option<FileAttachment>,
) -> Result<Value, DispatchError> {
    extract_from_pdf(state, IMAGE_PROMPT_PROMPT, file).await
}

pub async fn receipt_from_text(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let prompt = format!(
        "Extract the payment details from the following receipt text. \
         Return a JSON object with the fields: customerName, amount, paymentDate, paymentMethod, \
         and policyNumber. Respond with JSON only, inside a json code block.\n\nReceipt text:\n{}",
        text_field(payload, "text")
    );
    let completion = state.text_provider.generate(&prompt, None).await?;
    Ok(extract_json(&completion)?)
}

pub async fn change_from_text(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let prompt = format!(
        "Extract the policy change details from the following text. \
         Return a JSON object with the fields: customerName, policyNumber, previousPremium, \
         newPremium, and effectiveDate. Respond with JSON only, inside a json code block.\n\nText:\n{}",
        text_field(payload, "text")
    );
    let completion = state.text_provider.generate(&prompt, None).await?;
    Ok(extract_json(&completion)?)
}
