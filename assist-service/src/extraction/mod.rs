//! Response-shape recovery from raw model completions.
//!
//! Completions arrive as free-form text: the requested value is routinely
//! wrapped in markdown fences, prefaced with commentary, or followed by
//! explanatory asides. Each submodule recovers one expected shape (a JSON
//! value, an HTML email fragment, or customer-facing prose) using ordered,
//! first-match-wins heuristics. The precedence order is observable behavior
//! for ambiguous completions and must not be reshuffled.

pub mod html;
pub mod json;
pub mod prose;

use thiserror::Error;

/// Error type for completion extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no valid JSON found in model response")]
    NoJson,
}

/// Interior of the first fenced code block labeled `label`, if a complete
/// block exists. Label matching is ASCII case-insensitive.
fn fenced_block<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let lower = text.to_ascii_lowercase();
    let marker = format!("```{label}");
    let start = lower.find(&marker)?;
    let body = &text[start + marker.len()..];
    let end = body.find("```")?;
    Some(&body[..end])
}
