//! HTML fragment recovery for generated email bodies.

use super::fenced_block;

/// Commentary the model likes to append around email HTML. Compared
/// case-insensitively against the start of each trimmed line.
const COMMENTARY_PREFIXES: &[&str] = &["key improvements", "before sending", "important:"];

/// Headings whose text contains one of these words duplicate a title the
/// caller renders itself, so a single leading `<h1>`–`<h3>` carrying one of
/// them is dropped.
const DUPLICATE_TITLE_WORDS: &[&str] = &[
    "verification",
    "documentation",
    "quote",
    "notice",
    "receipt",
    "welcome",
    "renewal",
];

/// Recover a clean HTML fragment from a raw completion.
///
/// Ordered strategies, first match wins, each complete on its own:
/// 1. the interior of a fenced block labeled `html`;
/// 2. a `<!DOCTYPE…>`/`<html>` … `</html>` document span;
/// 3. a `<table>` … `</table>` span;
/// 4. line-based cleanup: drop fence markers, bullets, markdown headings and
///    known commentary lines, then strip one duplicated leading heading.
///
/// The result is always trimmed.
pub fn extract_html(completion: &str) -> String {
    if let Some(inner) = fenced_block(completion, "html") {
        return inner.trim().to_string();
    }
    if let Some(span) = document_span(completion) {
        return span.trim().to_string();
    }
    if let Some(span) = greedy_span(completion, "<table", "</table>") {
        return span.trim().to_string();
    }
    cleanup_lines(completion)
}

/// A full HTML document span: from `<!DOCTYPE` or `<html` to the last
/// `</html>`.
fn document_span(text: &str) -> Option<&str> {
    let lower = text.to_ascii_lowercase();
    let start = lower.find("<!doctype").or_else(|| lower.find("<html"))?;
    let end = lower.rfind("</html>")?;
    if end < start {
        return None;
    }
    Some(&text[start..end + "</html>".len()])
}

/// Greedy span from the first `open` to the last `close`, case-insensitive.
fn greedy_span<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let lower = text.to_ascii_lowercase();
    let start = lower.find(open)?;
    let end = lower.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&text[start..end + close.len()])
}

fn cleanup_lines(completion: &str) -> String {
    let kept: Vec<&str> = completion
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with("```") {
                return false;
            }
            if trimmed.starts_with('*') || trimmed.starts_with('#') {
                return false;
            }
            let lower = trimmed.to_ascii_lowercase();
            if COMMENTARY_PREFIXES.iter().any(|p| lower.starts_with(p)) {
                return false;
            }
            if lower.contains("remember to set") {
                return false;
            }
            true
        })
        .collect();

    strip_leading_heading(kept.join("\n").trim())
        .trim()
        .to_string()
}

/// Drop one `<h1>`–`<h3>` heading at the very start of `body` when its text
/// duplicates a title the caller renders separately.
fn strip_leading_heading(body: &str) -> String {
    let lower = body.to_ascii_lowercase();
    for tag in ["h1", "h2", "h3"] {
        if !lower.starts_with(&format!("<{tag}")) {
            continue;
        }
        let close = format!("</{tag}>");
        let (Some(open_end), Some(close_start)) = (body.find('>'), lower.find(&close)) else {
            break;
        };
        if open_end >= close_start {
            break;
        }
        let heading_text = body[open_end + 1..close_start].to_ascii_lowercase();
        if DUPLICATE_TITLE_WORDS.iter().any(|w| heading_text.contains(w)) {
            return body[close_start + close.len()..].trim_start().to_string();
        }
        break;
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_html_block_wins() {
        let completion = "Here is your email body:\n```html\n<p>Hi Jordan,</p>\n<p>Your policy renews soon.</p>\n```\nHope this helps!";
        assert_eq!(
            extract_html(completion),
            "<p>Hi Jordan,</p>\n<p>Your policy renews soon.</p>"
        );
    }

    #[test]
    fn full_document_is_returned_unchanged() {
        let doc = "<html><body><p>Your quote is ready.</p></body></html>";
        let completion = format!("Sure, here you go:\n{doc}\nAnything else?");
        assert_eq!(extract_html(&completion), doc);
    }

    #[test]
    fn doctype_document_is_returned_unchanged() {
        let doc = "<!DOCTYPE html>\n<html><body><p>Hello</p></body></html>";
        let completion = format!("{doc}\n\nLet me know if you want a plain-text version.");
        assert_eq!(extract_html(&completion), doc);
    }

    #[test]
    fn table_span_is_extracted() {
        let completion =
            "The layout uses a table:\n<table><tr><td>Premium</td><td>$1,200</td></tr></table>\nNote the inline styles.";
        assert_eq!(
            extract_html(completion),
            "<table><tr><td>Premium</td><td>$1,200</td></tr></table>"
        );
    }

    #[test]
    fn line_cleanup_drops_commentary_and_keeps_order() {
        let completion = "<p>Dear customer,</p>\n* Key improvements: tightened the copy\n<p>Your documents are attached.</p>\nImportant: set the date\n<p>Thank you.</p>";
        assert_eq!(
            extract_html(completion),
            "<p>Dear customer,</p>\n<p>Your documents are attached.</p>\n<p>Thank you.</p>"
        );
    }

    #[test]
    fn line_cleanup_drops_fences_headings_and_reminders() {
        let completion = "```\n# Draft email\n<p>Hello!</p>\nRemember to set the reply-to address before sending.\n```";
        assert_eq!(extract_html(completion), "<p>Hello!</p>");
    }

    #[test]
    fn duplicate_leading_heading_is_stripped() {
        let completion =
            "<h2>Auto Insurance Verification</h2>\n<p>Please find your verification details below.</p>";
        assert_eq!(
            extract_html(completion),
            "<p>Please find your verification details below.</p>"
        );
    }

    #[test]
    fn unrelated_leading_heading_is_kept() {
        let completion = "<h2>Monthly Update</h2>\n<p>Here is what changed.</p>";
        assert_eq!(extract_html(completion), completion);
    }

    #[test]
    fn heading_is_only_stripped_at_the_very_start() {
        let completion = "<p>Intro.</p>\n<h2>Renewal Notice</h2>\n<p>Body.</p>";
        assert_eq!(extract_html(completion), completion);
    }

    #[test]
    fn result_is_trimmed() {
        assert_eq!(extract_html("\n\n<p>Hi</p>\n\n"), "<p>Hi</p>");
    }
}
