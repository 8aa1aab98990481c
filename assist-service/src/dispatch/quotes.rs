//! Quote email prose: greeting, intro, and call-to-action copy.

use super::{append_custom_instructions, text_field, DispatchError};
use crate::extraction::json::extract_json;
use crate::startup::AppState;
use serde_json::Value;

fn quote_prose_prompt(kind: &str, detail_label: &str, detail_key: &str, payload: &Value) -> String {
    let mut prompt = format!(
        "Write the personalized prose for a {kind} insurance quote email with these details:\n\
         Customer: {}\n{detail_label}: {}\nQuoted premium: {}\nEffective date: {}\n\
         Return a JSON object with exactly these keys: \"greeting\", \"intro\", \"ctaText\".",
        text_field(payload, "customerName"),
        text_field(payload, detail_key),
        text_field(payload, "premium"),
        text_field(payload, "effectiveDate"),
    );
    append_custom_instructions(&mut prompt, payload);
    prompt
}

pub async fn home_quote_prose(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let prompt = quote_prose_prompt("home", "Property", "propertyAddress", payload);
    let completion = state.text_provider.generate(&prompt, None).await?;
    Ok(extract_json(&completion)?)
}

pub async fn auto_quote_prose(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let prompt = quote_prose_prompt("auto", "Vehicle", "vehicle", payload);
    let completion = state.text_provider.generate(&prompt, None).await?;
    Ok(extract_json(&completion)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn home_and_auto_prompts_differ_only_in_detail() {
        let payload = json!({"customerName": "Riley Chen", "premium": "$1,240/yr"});
        let home = quote_prose_prompt("home", "Property", "propertyAddress", &payload);
        let auto = quote_prose_prompt("auto", "Vehicle", "vehicle", &payload);

        assert!(home.contains("home insurance quote"));
        assert!(auto.contains("auto insurance quote"));
        assert!(home.contains("Customer: Riley Chen"));
        assert!(auto.contains("Vehicle: "));
        assert!(home.contains("\"ctaText\""));
    }
}
