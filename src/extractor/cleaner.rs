//! Markup-to-text normalization and document-level cleanup.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Appended to documents cut at the length bound.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated due to length...]";

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static EDIT_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[\s*edit\s*\]").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static CITATION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").unwrap());

static TRAILING_SPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").unwrap());

static BLANK_LINES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:nbsp|amp|lt|gt|quot|#0?39);").unwrap());

/// Decode the handful of entities MediaWiki emits, in a single left-to-right
/// pass: "&amp;lt;" becomes "&lt;", never "<".
fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY_REGEX.replace_all(text, |caps: &Captures| match &caps[0] {
        "&nbsp;" => " ",
        "&amp;" => "&",
        "&lt;" => "<",
        "&gt;" => ">",
        "&quot;" => "\"",
        _ => "'",
    })
}

/// Convert an HTML fragment to a single line of plain text.
///
/// The output holds no tags, no decodable entities and no `[edit]` links, so
/// feeding it back in returns it unchanged.
pub fn html_to_plain_text(html: &str) -> String {
    let mut text = html.to_string();

    // Decoding can surface markup ("&lt;br&gt;") or another entity
    // ("&amp;nbsp;"); every pass that changes anything shortens the text.
    loop {
        let stripped = TAG_REGEX.replace_all(&text, " ");
        let decoded = decode_entities(&stripped);
        let next = EDIT_LINK_REGEX.replace_all(&decoded, "").into_owned();
        if next == text {
            break;
        }
        text = next;
    }

    collapse_whitespace(&text)
}

/// Remove `[edit]` link artifacts left behind by section headings.
pub fn strip_edit_links(text: &str) -> String {
    let mut text = text.to_string();
    // Removing one link can expose another, e.g. "[[edit]edit]"
    while EDIT_LINK_REGEX.is_match(&text) {
        text = EDIT_LINK_REGEX.replace_all(&text, "").into_owned();
    }
    text
}

/// Collapse whitespace runs inside a paragraph of DOM text.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Cleanup pass over an assembled multi-section document.
pub fn clean_content(content: &str) -> String {
    let text = CITATION_REGEX.replace_all(content, "");
    let text = TRAILING_SPACE_REGEX.replace_all(&text, "\n");
    let text = BLANK_LINES_REGEX.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Cut `text` to `max` characters and append [`TRUNCATION_MARKER`].
///
/// Text within the bound is returned unchanged.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + TRUNCATION_MARKER.len());
            truncated.push_str(&text[..cut]);
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => text.to_string(),
    }
}
