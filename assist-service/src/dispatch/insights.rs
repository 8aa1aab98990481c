//! Book-of-business insights: cross-sell opportunities and rate-change copy.

use super::{append_custom_instructions, number_field, text_field, DispatchError};
use crate::extraction::{json::extract_json, prose::clean_prose};
use crate::startup::AppState;
use serde_json::Value;

fn opportunities_prompt(payload: &Value) -> String {
    let mut prompt = format!(
        "Suggest outreach opportunities for an insurance agent based on this customer profile:\n\
         Customer: {}\nCurrent policies: {}\nRenewal date: {}\nRecent life events: {}\n\
         Return the result as a JSON array of objects with the keys \"title\", \"description\", \
         and \"priority\" (one of \"high\", \"medium\", \"low\"), inside a json code block.",
        text_field(payload, "customerName"),
        text_field(payload, "currentPolicies"),
        text_field(payload, "renewalDate"),
        text_field(payload, "lifeEvents"),
    );
    append_custom_instructions(&mut prompt, payload);
    prompt
}

fn rate_change_prompt(payload: &Value) -> String {
    format!(
        "Write a short, empathetic, plain-language explanation an insurance agent can send to a \
         customer whose premium changed from ${:.2} to ${:.2}. Two or three sentences, no lists, \
         no salutation, and no meta commentary about the text itself.",
        number_field(payload, "previousPremium"),
        number_field(payload, "newPremium"),
    )
}

pub async fn opportunities(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let completion = state
        .text_provider
        .generate(&opportunities_prompt(payload), None)
        .await?;
    Ok(extract_json(&completion)?)
}

pub async fn rate_change_explanation(
    state: &AppState,
    payload: &Value,
) -> Result<Value, DispatchError> {
    let completion = state
        .text_provider
        .generate(&rate_change_prompt(payload), None)
        .await?;
    Ok(Value::String(clean_prose(&completion)))
}
