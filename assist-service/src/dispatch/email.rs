//! Email content actions: subject lines, preheaders, and the HTML body.

use super::{append_custom_instructions, text_field, DispatchError};
use crate::extraction::{html::extract_html, json::extract_json};
use crate::startup::AppState;
use serde_json::Value;

fn campaign_summary(form: &Value) -> String {
    format!(
        "Campaign: {}\nEmail type: {}\nRecipient: {}\nPolicy type: {}\nAgency: {}\nTone: {}",
        text_field(form, "campaignName"),
        text_field(form, "emailType"),
        text_field(form, "recipientName"),
        text_field(form, "policyType"),
        text_field(form, "agencyName"),
        text_field(form, "tone"),
    )
}

fn subject_lines_prompt(payload: &Value) -> String {
    let mut prompt = format!(
        "Generate 3 compelling email subject lines for an insurance email with these details:\n{}\n\
         Keep each under 60 characters. Return the result as a JSON array of exactly 3 strings, \
         inside a json code block.",
        campaign_summary(payload)
    );
    append_custom_instructions(&mut prompt, payload);
    prompt
}

fn preheaders_prompt(payload: &Value) -> String {
    let mut prompt = format!(
        "Generate 3 short preheader lines for an insurance email with these details:\n{}\n\
         Each preheader should complement the subject line and stay under 90 characters. \
         Return the result as a JSON array of exactly 3 strings, inside a json code block.",
        campaign_summary(payload)
    );
    append_custom_instructions(&mut prompt, payload);
    prompt
}

fn email_body_prompt(payload: &Value) -> String {
    let form = payload.get("formData").cloned().unwrap_or_default();
    let agent = payload.get("agent").cloned().unwrap_or_default();

    let mut prompt = format!(
        "Write the HTML body of an insurance email with these details:\n{}\n\
         Sign off as {} from {} (phone: {}, email: {}).\n\
         Use simple inline-styled HTML suitable for email clients. Do not include \
         <html>, <head> or <body> wrapper tags, and do not repeat the email title \
         as a heading; the application renders the title separately.",
        campaign_summary(&form),
        text_field(&agent, "name"),
        text_field(&agent, "agencyName"),
        text_field(&agent, "phone"),
        text_field(&agent, "email"),
    );
    append_custom_instructions(&mut prompt, &form);
    prompt
}

pub async fn subject_lines(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let completion = state
        .text_provider
        .generate(&subject_lines_prompt(payload), None)
        .await?;
    Ok(extract_json(&completion)?)
}

pub async fn preheaders(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let completion = state
        .text_provider
        .generate(&preheaders_prompt(payload), None)
        .await?;
    Ok(extract_json(&completion)?)
}

pub async fn email_body(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let completion = state
        .text_provider
        .generate(&email_body_prompt(payload), None)
        .await?;
    Ok(Value::String(extract_html(&completion)))
}
