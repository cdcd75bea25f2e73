use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::extractor::{
    ExtractError,
    cleaner::{clean_content, truncate},
};

/// Normalized, Markdown-flavoured article text.
///
/// Starts with a `# Title` line, followed by paragraphs and `## Heading`
/// sections. Documents built through [`ExtractedDocument::assemble`] carry no
/// citation markers and respect the length bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    text: String,
}

impl ExtractedDocument {
    /// Wrap already-normalized text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Clean raw assembled text and bound it to `max_length` characters.
    pub fn assemble(raw: &str, max_length: usize) -> Self {
        let cleaned = clean_content(raw);
        Self::new(truncate(&cleaned, max_length))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Fail with [`ExtractError::InsufficientContent`] below `required` characters.
    pub fn ensure_min_length(&self, required: usize) -> Result<(), ExtractError> {
        let length = self.len();
        if length < required {
            return Err(ExtractError::InsufficientContent { length, required });
        }
        Ok(())
    }
}

impl Display for ExtractedDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// One heading-delimited region of an article, as listed by the parse API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub index: u32,
    pub heading: String,
}

impl SectionDescriptor {
    pub fn new(index: u32, heading: impl Into<String>) -> Self {
        Self {
            index,
            heading: heading.into(),
        }
    }
}

/// Administrative sections never worth extracting.
pub const EXCLUDED_SECTIONS: [&str; 6] = [
    "References",
    "External links",
    "See also",
    "Further reading",
    "Notes",
    "Citations",
];

pub fn is_excluded_heading(heading: &str) -> bool {
    EXCLUDED_SECTIONS.contains(&heading)
}
