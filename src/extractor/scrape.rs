//! Article extraction from the rendered page HTML.
//!
//! Used when the API strategies are unavailable or come back thin. The page
//! is parsed with `scraper` and walked structurally: the lead paragraphs that
//! precede the first level-2 heading, then each eligible section's paragraphs.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument};

use crate::{
    config::DEFAULT_MAX_CONTENT_LENGTH,
    extractor::{
        ExtractError, ExtractedDocument, ExtractionStrategy,
        cleaner::{clean_content, collapse_whitespace, strip_edit_links, truncate},
        model::is_excluded_heading,
    },
    fetcher::WikiClient,
    resolver::PageReference,
};

/// Bodies shorter than this are error pages or redirect stubs.
pub const MIN_HTML_LENGTH: usize = 1000;

const DEFAULT_TITLE: &str = "Wikipedia Article";
const MAX_LEAD_PARAGRAPHS: usize = 10;
const LEAD_FALLBACK_PARAGRAPHS: usize = 3;

static FIRST_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#firstHeading").unwrap());

static CONTENT_ROOT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#mw-content-text .mw-parser-output").unwrap());

static HEADLINE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".mw-headline").unwrap());

static H2: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());

/// How the lead (introduction) paragraphs are picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadSelection {
    /// Paragraphs before the first level-2 heading or table of contents.
    Structural,
    /// The first top-level paragraphs, whatever follows them.
    FirstParagraphs,
}

/// Knobs distinguishing the primary scraper from the simplified one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeProfile {
    pub name: &'static str,
    pub timeout: Duration,
    pub lead: LeadSelection,
    /// Paragraphs collected per section before moving on.
    pub section_paragraphs: usize,
    /// Only the first N level-2 headings are considered, if set.
    pub max_sections: Option<usize>,
    /// Paragraphs shorter than this (in characters) are skipped.
    pub min_paragraph_chars: usize,
    /// Documents shorter than this fail with `InsufficientContent`.
    pub min_length: usize,
}

impl ScrapeProfile {
    pub fn primary() -> Self {
        Self {
            name: "scrape",
            timeout: Duration::from_secs(8),
            lead: LeadSelection::Structural,
            section_paragraphs: 5,
            max_sections: None,
            min_paragraph_chars: 1,
            min_length: 100,
        }
    }

    pub fn simplified() -> Self {
        Self {
            name: "simplified-scrape",
            timeout: Duration::from_secs(5),
            lead: LeadSelection::FirstParagraphs,
            section_paragraphs: 5,
            max_sections: Some(5),
            min_paragraph_chars: 21,
            min_length: 100,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches the live article page and extracts it by DOM traversal.
#[derive(Debug, Clone)]
pub struct PageScraper {
    client: WikiClient,
    profile: ScrapeProfile,
    max_length: usize,
}

impl PageScraper {
    pub fn new(client: WikiClient, profile: ScrapeProfile) -> Self {
        Self {
            client,
            profile,
            max_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn profile(&self) -> &ScrapeProfile {
        &self.profile
    }
}

#[async_trait]
impl ExtractionStrategy for PageScraper {
    #[instrument(skip_all, fields(url = %page.url()))]
    async fn extract(&self, page: &PageReference) -> Result<ExtractedDocument, ExtractError> {
        let html = self.client.get_html(page.url(), self.profile.timeout).await?;

        if html.len() < MIN_HTML_LENGTH {
            return Err(ExtractError::InsufficientContent {
                length: html.len(),
                required: MIN_HTML_LENGTH,
            });
        }

        let document = ExtractedDocument::new(clean_content(&parse_article(&html, &self.profile)));
        document.ensure_min_length(self.profile.min_length)?;

        let document = ExtractedDocument::new(truncate(document.as_str(), self.max_length));
        info!("{} scraped {} characters", self.profile.name, document.len());
        Ok(document)
    }

    fn name(&self) -> &'static str {
        self.profile.name
    }
}

/// Walk a rendered article and assemble its raw Markdown-flavoured text.
///
/// The result still needs [`clean_content`]; citation markers survive here.
pub fn parse_article(html: &str, profile: &ScrapeProfile) -> String {
    let document = Html::parse_document(html);

    let title = document
        .select(&FIRST_HEADING)
        .next()
        .map(element_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let mut content = format!("# {}\n\n", title);

    let Some(root) = document.select(&CONTENT_ROOT).next() else {
        return content;
    };
    let blocks: Vec<ElementRef> = root.children().filter_map(ElementRef::wrap).collect();

    let lead = match profile.lead {
        LeadSelection::Structural => structural_lead(&blocks),
        LeadSelection::FirstParagraphs => first_paragraphs(&blocks, profile.min_paragraph_chars),
    };
    for paragraph in lead {
        content.push_str(&paragraph);
        content.push_str("\n\n");
    }

    let headings = blocks
        .iter()
        .filter(|el| is_section_heading(el))
        .take(profile.max_sections.unwrap_or(usize::MAX));

    for heading in headings {
        let text = heading_text(*heading);
        if text.is_empty() || is_excluded_heading(&text) {
            continue;
        }

        content.push_str(&format!("## {}\n\n", text));
        for paragraph in section_paragraphs(
            *heading,
            profile.section_paragraphs,
            profile.min_paragraph_chars,
        ) {
            content.push_str(&paragraph);
            content.push_str("\n\n");
        }
    }

    content
}

/// Paragraphs following `heading`, stopping at the next level-2 heading
/// (structural boundary) or after `cap` paragraphs (count cap).
pub fn section_paragraphs<'a>(
    heading: ElementRef<'a>,
    cap: usize,
    min_chars: usize,
) -> impl Iterator<Item = String> + 'a {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| !is_section_heading(el))
        .filter(is_paragraph)
        .map(element_text)
        .filter(move |text| text.chars().count() >= min_chars)
        .take(cap)
}

fn structural_lead(blocks: &[ElementRef]) -> Vec<String> {
    let lead: Vec<String> = blocks
        .iter()
        .take_while(|el| !is_section_heading(el) && el.value().id() != Some("toc"))
        .filter(|el| is_paragraph(el))
        .map(|el| element_text(*el))
        .filter(|text| !text.is_empty() && !text.contains("Coordinates:"))
        .take(MAX_LEAD_PARAGRAPHS)
        .collect();

    if !lead.is_empty() {
        return lead;
    }

    blocks
        .iter()
        .filter(|el| is_paragraph(el))
        .map(|el| element_text(*el))
        .filter(|text| !text.is_empty())
        .take(LEAD_FALLBACK_PARAGRAPHS)
        .collect()
}

fn first_paragraphs(blocks: &[ElementRef], min_chars: usize) -> Vec<String> {
    blocks
        .iter()
        .filter(|el| is_paragraph(el))
        .take(MAX_LEAD_PARAGRAPHS)
        .map(|el| element_text(*el))
        .filter(|text| text.chars().count() >= min_chars)
        .collect()
}

fn is_paragraph(el: &ElementRef) -> bool {
    el.value().name() == "p"
}

/// A top-level `h2`, or the `div.mw-heading2` wrapper current skins emit.
fn is_section_heading(el: &ElementRef) -> bool {
    let element = el.value();
    match element.name() {
        "h2" => true,
        "div" => element.classes().any(|class| class == "mw-heading2"),
        _ => false,
    }
}

fn heading_text(heading: ElementRef) -> String {
    let source = heading
        .select(&HEADLINE)
        .next()
        .or_else(|| (heading.value().name() != "h2").then(|| heading.select(&H2).next()).flatten())
        .unwrap_or(heading);
    strip_edit_links(&element_text(source)).trim().to_string()
}

fn element_text(el: ElementRef) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}
