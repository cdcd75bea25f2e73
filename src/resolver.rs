//! Wikipedia article URL validation and page-title derivation.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;

use crate::extractor::ExtractError;

/// Substring every accepted article URL must contain.
pub const ARTICLE_PATH_MARKER: &str = "wikipedia.org/wiki/";

const WIKI_PATH: &str = "/wiki/";

/// Characters left untouched when a title is used as one URL path component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// An article URL together with its decoded page title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReference {
    url: String,
    title: String,
}

impl PageReference {
    /// Build a reference without validation. Prefer [`resolve`] for user input.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Validate `url` and derive its page title.
///
/// The title is the path segment after `/wiki/` with any `#fragment` removed,
/// percent-decoded exactly once.
pub fn resolve(url: &str) -> Result<PageReference, ExtractError> {
    if !url.contains(ARTICLE_PATH_MARKER) {
        return Err(ExtractError::InvalidUrl(format!(
            "URL must contain '{}'",
            ARTICLE_PATH_MARKER
        )));
    }

    let segment = url
        .split(WIKI_PATH)
        .nth(1)
        .and_then(|rest| rest.split('#').next())
        .unwrap_or_default();
    if segment.is_empty() {
        return Err(ExtractError::InvalidUrl(
            "URL does not name an article".to_string(),
        ));
    }

    if has_malformed_escape(segment) {
        return Err(ExtractError::InvalidUrl(
            "title contains a malformed percent escape".to_string(),
        ));
    }

    let title = percent_decode_str(segment)
        .decode_utf8()
        .map_err(|e| ExtractError::InvalidUrl(format!("title is not valid UTF-8: {}", e)))?
        .into_owned();

    Ok(PageReference::new(url, title))
}

/// True when a `%` is not followed by two hex digits.
fn has_malformed_escape(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

/// Percent-encode a title for use as a single URL path component.
pub fn encode_title(title: &str) -> String {
    utf8_percent_encode(title, COMPONENT).to_string()
}
