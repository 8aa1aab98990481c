//! JSON recovery from free-form completions.

use super::{fenced_block, ExtractError};
use serde_json::Value;

/// Recover a JSON value from a raw completion.
///
/// Ordered, first match wins:
/// 1. a fenced block explicitly labeled `json`: parse its interior;
/// 2. the greedy span from the first `{` to the last `}`: parse it;
/// 3. otherwise, or when the matched text does not parse, fail.
///
/// This is a deliberate heuristic, not a balanced-brace parser: multiple or
/// nested JSON blocks are not disambiguated, and the greedy span can swallow
/// unrelated braces. Callers depend on exactly this precedence.
pub fn extract_json(completion: &str) -> Result<Value, ExtractError> {
    if let Some(inner) = fenced_block(completion, "json") {
        return serde_json::from_str(inner.trim()).map_err(|_| ExtractError::NoJson);
    }

    match (completion.find('{'), completion.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str(&completion[start..=end]).map_err(|_| ExtractError::NoJson)
        }
        _ => Err(ExtractError::NoJson),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_json_block_wins() {
        let completion = "Here is the data you asked for:\n```json\n{\"subject\": \"Renewal time\"}\n```\nLet me know if you need more.";
        assert_eq!(
            extract_json(completion).expect("extract"),
            json!({"subject": "Renewal time"})
        );
    }

    #[test]
    fn fenced_array_is_supported() {
        let completion = "```json\n[\"one\", \"two\", \"three\"]\n```";
        assert_eq!(
            extract_json(completion).expect("extract"),
            json!(["one", "two", "three"])
        );
    }

    #[test]
    fn bare_object_is_recovered_by_greedy_span() {
        let completion = "Sure! The extracted fields are {\"premium\": 1200, \"term\": \"12 months\"} as requested.";
        assert_eq!(
            extract_json(completion).expect("extract"),
            json!({"premium": 1200, "term": "12 months"})
        );
    }

    #[test]
    fn greedy_span_runs_first_brace_to_last_brace() {
        // Two objects: the greedy span covers both and fails to parse.
        let completion = "{\"a\": 1} and also {\"b\": 2}";
        assert!(matches!(extract_json(completion), Err(ExtractError::NoJson)));
    }

    #[test]
    fn no_braces_and_no_fence_fails() {
        let completion = "I could not find any structured data in the document.";
        assert!(matches!(extract_json(completion), Err(ExtractError::NoJson)));
    }

    #[test]
    fn fenced_block_that_does_not_parse_fails() {
        let completion = "```json\nnot json at all\n```";
        assert!(matches!(extract_json(completion), Err(ExtractError::NoJson)));
    }

    #[test]
    fn bare_array_without_fence_is_not_rescued() {
        // The greedy span only looks for braces; a bare array stays
        // unrecoverable. Prompts for array-valued actions instruct the model
        // to fence its output.
        assert!(matches!(extract_json("[1, 2, 3]"), Err(ExtractError::NoJson)));
    }

    #[test]
    fn fenced_block_with_uppercase_label() {
        let completion = "```JSON\n{\"ok\": true}\n```";
        assert_eq!(extract_json(completion).expect("extract"), json!({"ok": true}));
    }

    #[test]
    fn nested_object_parses_through_greedy_span() {
        let completion = "Result: {\"coverages\": {\"dwelling\": 250000, \"liability\": 300000}}";
        assert_eq!(
            extract_json(completion).expect("extract"),
            json!({"coverages": {"dwelling": 250000, "liability": 300000}})
        );
    }
}
