use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::{
    config::Config,
    extractor::{
        ExtractedDocument, PageScraper, ScrapeProfile, SectionFetcher, SummaryFetcher,
        fallback_document,
    },
    fetcher::{FetchError, WikiClient},
    pipeline::{Stage, run_stages},
    resolver::resolve,
};

/// Minimum document lengths, in characters, for each cascade stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub structured: usize,
    pub summary: usize,
    pub scrape: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            structured: 500,
            summary: 300,
            scrape: 100,
        }
    }
}

/// Outcome of a cascade run. Always carries a document.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub document: ExtractedDocument,
    pub used_fallback: bool,
    /// Why the fallback was used, when it was.
    pub message: Option<String>,
}

impl Extraction {
    fn extracted(document: ExtractedDocument) -> Self {
        Self {
            document,
            used_fallback: false,
            message: None,
        }
    }

    fn fallback(document: ExtractedDocument, message: String) -> Self {
        Self {
            document,
            used_fallback: true,
            message: Some(message),
        }
    }
}

/// Structured API, then REST summary, then page scraping. When all of them
/// fail the static fallback document is returned instead of an error.
#[derive(Debug, Clone)]
pub struct CascadeExtractor {
    stages: Vec<Stage>,
    fallback: ExtractedDocument,
}

impl CascadeExtractor {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            fallback: fallback_document(),
        }
    }

    pub fn with_fallback(mut self, fallback: ExtractedDocument) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::from_config_with(config, Thresholds::default())
    }

    pub fn from_config_with(config: &Config, thresholds: Thresholds) -> Result<Self, FetchError> {
        let client = WikiClient::new(config.user_agent(), config.request_timeout())?;
        let max_length = config.max_content_length();

        let structured = SectionFetcher::new(client.clone(), config.api_url().clone())
            .with_max_length(max_length);
        let summary = SummaryFetcher::new(client.clone(), config.rest_url().clone())
            .with_max_length(max_length);
        let scrape = PageScraper::new(client, ScrapeProfile::primary()).with_max_length(max_length);

        Ok(Self::new(vec![
            Stage::new(structured, thresholds.structured),
            Stage::new(summary, thresholds.summary),
            Stage::new(scrape, thresholds.scrape),
        ]))
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Extract the article at `url`. Never fails; check
    /// [`Extraction::used_fallback`] to tell real content from the fallback.
    #[instrument(skip(self))]
    pub async fn extract(&self, url: &str) -> Extraction {
        let page = match resolve(url) {
            Ok(page) => page,
            Err(e) => {
                warn!("Refusing to extract {}: {}", url, e);
                return Extraction::fallback(
                    self.fallback.clone(),
                    format!("{}. Showing fallback content instead.", e),
                );
            }
        };

        match run_stages(&self.stages, &page).await {
            Ok(document) => {
                info!("Extracted {} characters for {}", document.len(), page.title());
                Extraction::extracted(document)
            }
            Err(e) => {
                error!("All extraction strategies failed for {}: {}", page.title(), e);
                Extraction::fallback(
                    self.fallback.clone(),
                    format!(
                        "Could not extract content from Wikipedia ({}). \
                         Showing fallback content for demonstration purposes.",
                        e
                    ),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        extractor::{ExtractError, FALLBACK_DOCUMENT},
        pipeline::test_support::*,
    };
    use std::time::Duration;
    use url::Url;

    const ROCKET: &str = "https://en.wikipedia.org/wiki/Rocket";

    fn cascade(
        structured: crate::extractor::MockExtractionStrategy,
        summary: crate::extractor::MockExtractionStrategy,
        scrape: crate::extractor::MockExtractionStrategy,
    ) -> CascadeExtractor {
        let thresholds = Thresholds::default();
        CascadeExtractor::new(vec![
            Stage::new(structured, thresholds.structured),
            Stage::new(summary, thresholds.summary),
            Stage::new(scrape, thresholds.scrape),
        ])
    }

    #[tokio::test]
    async fn structured_result_is_used_directly() {
        let extractor = cascade(
            succeeding("structured", article(800)),
            untouched("summary"),
            untouched("scrape"),
        );
        let extraction = extractor.extract(ROCKET).await;
        assert!(!extraction.used_fallback);
        assert!(extraction.message.is_none());
        assert_eq!(extraction.document.len(), 800);
    }

    #[tokio::test]
    async fn escalates_to_summary_after_failure() {
        let summary_text = article(400);
        let extractor = cascade(
            failing("structured", || ExtractError::Extraction("api down".to_string())),
            succeeding("summary", summary_text.clone()),
            untouched("scrape"),
        );
        let extraction = extractor.extract(ROCKET).await;
        assert!(!extraction.used_fallback);
        assert_eq!(extraction.document.as_str(), summary_text);
    }

    #[tokio::test]
    async fn thin_results_escalate_to_scrape() {
        let extractor = cascade(
            succeeding("structured", article(499)),
            succeeding("summary", article(299)),
            succeeding("scrape", article(150)),
        );
        let extraction = extractor.extract(ROCKET).await;
        assert!(!extraction.used_fallback);
        assert_eq!(extraction.document.len(), 150);
    }

    #[tokio::test]
    async fn exhausted_cascade_returns_fallback() {
        let extractor = cascade(
            failing("structured", || ExtractError::PageNotFound("Rocket".to_string())),
            failing("summary", || ExtractError::Extraction("HTTP 404".to_string())),
            failing("scrape", || ExtractError::Timeout(Duration::from_secs(8))),
        );
        let extraction = extractor.extract(ROCKET).await;
        assert!(extraction.used_fallback);
        assert_eq!(extraction.document, *FALLBACK_DOCUMENT);
        let message = extraction.message.unwrap();
        assert!(message.contains("timed out"), "message: {}", message);
    }

    #[tokio::test]
    async fn invalid_url_skips_network() {
        let extractor = cascade(
            untouched("structured"),
            untouched("summary"),
            untouched("scrape"),
        );
        let extraction = extractor.extract("https://example.com/wiki/Rocket").await;
        assert!(extraction.used_fallback);
        assert_eq!(extraction.document, *FALLBACK_DOCUMENT);
        assert!(extraction.message.unwrap().contains("invalid Wikipedia URL"));
    }

    #[tokio::test]
    async fn custom_fallback_document() {
        let extractor = cascade(
            failing("structured", || ExtractError::Extraction("x".to_string())),
            failing("summary", || ExtractError::Extraction("x".to_string())),
            failing("scrape", || ExtractError::Extraction("x".to_string())),
        )
        .with_fallback(ExtractedDocument::new("# Offline"));
        let extraction = extractor.extract(ROCKET).await;
        assert_eq!(extraction.document.as_str(), "# Offline");
    }

    #[test]
    fn builds_stages_from_config() {
        let config = Config::new(
            Url::parse("https://en.wikipedia.org/w/api.php").unwrap(),
            Url::parse("https://en.wikipedia.org/api/rest_v1").unwrap(),
        );
        let extractor = CascadeExtractor::from_config(&config).unwrap();
        assert_eq!(extractor.stage_names(), vec!["structured", "summary", "scrape"]);
        let minimums: Vec<usize> = extractor.stages.iter().map(Stage::min_length).collect();
        assert_eq!(minimums, vec![500, 300, 100]);
    }
}
