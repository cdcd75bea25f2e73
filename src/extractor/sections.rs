use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::{
    config::DEFAULT_MAX_CONTENT_LENGTH,
    extractor::{
        ExtractError, ExtractedDocument, ExtractionStrategy, SectionDescriptor,
        cleaner::html_to_plain_text, model::is_excluded_heading,
    },
    fetcher::{FetchError, WikiClient},
    resolver::PageReference,
};

const MAX_SECTIONS: usize = 5;

/// Page id the query API reports for titles that do not exist.
const MISSING_PAGE_ID: &str = "-1";

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    info: Option<String>,
}

impl ApiErrorBody {
    fn into_fetch_error(self) -> FetchError {
        let message = self
            .info
            .or(self.code)
            .unwrap_or_else(|| "unknown api error".to_string());
        FetchError::Api(message)
    }
}

#[derive(Debug, Deserialize)]
struct ParseResponse<T> {
    parse: Option<T>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ParsedSections {
    #[serde(default)]
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    index: RawIndex,
    line: String,
}

// The parse API reports indices as strings ("1"), sometimes not numeric ("T-1")
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Number(u32),
    Text(String),
}

impl RawIndex {
    fn as_number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ParsedText {
    #[serde(default)]
    text: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<IntroQuery>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct IntroQuery {
    #[serde(default)]
    pages: HashMap<String, IntroPage>,
}

#[derive(Debug, Deserialize)]
struct IntroPage {
    title: Option<String>,
    extract: Option<String>,
    missing: Option<serde_json::Value>,
    invalid: Option<serde_json::Value>,
}

/// Builds a document from the action API: the plain-text introduction plus
/// up to five eligible sections fetched one by one.
#[derive(Debug, Clone)]
pub struct SectionFetcher {
    client: WikiClient,
    api_url: Url,
    max_sections: usize,
    max_length: usize,
}

impl SectionFetcher {
    pub fn new(client: WikiClient, api_url: Url) -> Self {
        Self {
            client,
            api_url,
            max_sections: MAX_SECTIONS,
            max_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// List the page's sections. Failures are logged and yield an empty list
    /// so extraction can continue with the introduction alone.
    pub async fn fetch_sections(&self, title: &str) -> Vec<SectionDescriptor> {
        match self.try_fetch_sections(title).await {
            Ok(sections) => {
                debug!("page lists {} sections", sections.len());
                sections
            }
            Err(e) => {
                warn!("Failed to fetch sections for {}: {}", title, e);
                Vec::new()
            }
        }
    }

    async fn try_fetch_sections(&self, title: &str) -> Result<Vec<SectionDescriptor>, FetchError> {
        let response: ParseResponse<ParsedSections> = self
            .client
            .get_json(
                &self.api_url,
                &[
                    ("action", "parse"),
                    ("page", title),
                    ("prop", "sections"),
                    ("format", "json"),
                ],
            )
            .await?;

        if let Some(error) = response.error {
            return Err(error.into_fetch_error());
        }

        let sections = response
            .parse
            .map(|parsed| parsed.sections)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| {
                let index = raw.index.as_number()?;
                Some(SectionDescriptor::new(index, html_to_plain_text(&raw.line)))
            })
            .collect();

        Ok(sections)
    }

    /// Fetch the plain-text lead as `# <title>\n\n<extract>`.
    pub async fn fetch_introduction(&self, title: &str) -> Result<String, ExtractError> {
        let response: QueryResponse = self
            .client
            .get_json(
                &self.api_url,
                &[
                    ("action", "query"),
                    ("titles", title),
                    ("prop", "extracts"),
                    ("exintro", "1"),
                    ("explaintext", "1"),
                    ("format", "json"),
                ],
            )
            .await?;

        if let Some(error) = response.error {
            return Err(error.into_fetch_error().into());
        }

        let pages = response.query.map(|q| q.pages).unwrap_or_default();
        let Some((page_id, page)) = pages.into_iter().next() else {
            return Err(ExtractError::Extraction(
                "query response contained no pages".to_string(),
            ));
        };

        if page_id == MISSING_PAGE_ID || page.missing.is_some() || page.invalid.is_some() {
            return Err(ExtractError::PageNotFound(title.to_string()));
        }

        let heading = page.title.unwrap_or_else(|| title.to_string());
        let extract = page.extract.unwrap_or_default();
        Ok(format!("# {}\n\n{}", heading, extract))
    }

    /// Fetch one section's HTML and normalize it to plain text.
    pub async fn fetch_section_text(&self, title: &str, index: u32) -> Result<String, FetchError> {
        let section = index.to_string();
        let response: ParseResponse<ParsedText> = self
            .client
            .get_json(
                &self.api_url,
                &[
                    ("action", "parse"),
                    ("page", title),
                    ("section", &section),
                    ("prop", "text"),
                    ("format", "json"),
                ],
            )
            .await?;

        if let Some(error) = response.error {
            return Err(error.into_fetch_error());
        }

        let html = response
            .parse
            .and_then(|mut parsed| parsed.text.remove("*"))
            .unwrap_or_default();

        Ok(html_to_plain_text(&html))
    }
}

/// Drop administrative sections and keep the first `limit` of the rest,
/// in their original order.
pub fn eligible_sections(sections: &[SectionDescriptor], limit: usize) -> Vec<&SectionDescriptor> {
    sections
        .iter()
        .filter(|section| !is_excluded_heading(&section.heading))
        .take(limit)
        .collect()
}

#[async_trait]
impl ExtractionStrategy for SectionFetcher {
    #[instrument(skip_all, fields(title = %page.title()))]
    async fn extract(&self, page: &PageReference) -> Result<ExtractedDocument, ExtractError> {
        let title = page.title();

        let sections = self.fetch_sections(title).await;
        let mut content = self.fetch_introduction(title).await?;

        // One at a time, in document order
        for section in eligible_sections(&sections, self.max_sections) {
            match self.fetch_section_text(title, section.index).await {
                Ok(text) if !text.is_empty() => {
                    content.push_str(&format!("\n\n## {}\n\n{}", section.heading, text));
                }
                Ok(_) => debug!("section {} is empty, skipping", section.heading),
                Err(e) => warn!("Failed to fetch section {}: {}", section.heading, e),
            }
        }

        let document = ExtractedDocument::assemble(&content, self.max_length);
        info!("assembled {} characters from the action api", document.len());
        Ok(document)
    }

    fn name(&self) -> &'static str {
        "structured"
    }
}
