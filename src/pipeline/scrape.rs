use tracing::{error, instrument};

use crate::{
    config::Config,
    extractor::{ExtractError, ExtractedDocument, PageScraper, ScrapeProfile},
    fetcher::{FetchError, WikiClient},
    pipeline::{Stage, run_stages},
    resolver::resolve,
};

/// Scrape-only extraction: the primary page scraper, then the simplified
/// one. Unlike [`CascadeExtractor`](super::CascadeExtractor) it reports
/// failure instead of substituting content.
#[derive(Debug, Clone)]
pub struct ScrapeExtractor {
    stages: Vec<Stage>,
}

impl ScrapeExtractor {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = WikiClient::new(config.user_agent(), config.request_timeout())?;
        let max_length = config.max_content_length();

        let stages = [ScrapeProfile::primary(), ScrapeProfile::simplified()]
            .into_iter()
            .map(|profile| {
                let min_length = profile.min_length;
                Stage::new(
                    PageScraper::new(client.clone(), profile).with_max_length(max_length),
                    min_length,
                )
            })
            .collect();

        Ok(Self::new(stages))
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Fails with [`ExtractError::InvalidUrl`] before any request is made,
    /// or with [`ExtractError::ExtractionFailed`] wrapping the last stage's
    /// error once every scraper has failed.
    #[instrument(skip(self))]
    pub async fn extract(&self, url: &str) -> Result<ExtractedDocument, ExtractError> {
        let page = resolve(url)?;

        run_stages(&self.stages, &page).await.map_err(|e| match e {
            ExtractError::InvalidUrl(_) | ExtractError::ExtractionFailed(_) => e,
            cause => {
                error!("All scraping methods failed for {}: {}", page.title(), cause);
                ExtractError::ExtractionFailed(Box::new(cause))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::*;
    use std::time::Duration;
    use url::Url;

    const ROCKET: &str = "https://en.wikipedia.org/wiki/Rocket";

    #[tokio::test]
    async fn primary_success_skips_simplified() {
        let extractor = ScrapeExtractor::new(vec![
            Stage::new(succeeding("scrape", article(250)), 100),
            Stage::new(untouched("simplified-scrape"), 100),
        ]);
        let document = extractor.extract(ROCKET).await.unwrap();
        assert_eq!(document.len(), 250);
    }

    #[tokio::test]
    async fn falls_back_to_simplified() {
        let extractor = ScrapeExtractor::new(vec![
            Stage::new(
                failing("scrape", || ExtractError::Timeout(Duration::from_secs(8))),
                100,
            ),
            Stage::new(succeeding("simplified-scrape", article(180)), 100),
        ]);
        let document = extractor.extract(ROCKET).await.unwrap();
        assert_eq!(document.len(), 180);
    }

    #[tokio::test]
    async fn exhaustion_wraps_last_error() {
        let extractor = ScrapeExtractor::new(vec![
            Stage::new(
                failing("scrape", || ExtractError::Extraction("HTTP 503".to_string())),
                100,
            ),
            Stage::new(
                failing("simplified-scrape", || {
                    ExtractError::Timeout(Duration::from_secs(5))
                }),
                100,
            ),
        ]);
        let err = extractor.extract(ROCKET).await.unwrap_err();
        match err {
            ExtractError::ExtractionFailed(cause) => {
                assert!(matches!(*cause, ExtractError::Timeout(d) if d == Duration::from_secs(5)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn short_scrape_is_insufficient() {
        let extractor = ScrapeExtractor::new(vec![
            Stage::new(succeeding("scrape", article(60)), 100),
            Stage::new(succeeding("simplified-scrape", article(99)), 100),
        ]);
        let err = extractor.extract(ROCKET).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractError::ExtractionFailed(cause)
                if matches!(*cause, ExtractError::InsufficientContent { length: 99, required: 100 })
        ));
    }

    #[tokio::test]
    async fn invalid_url_fails_immediately() {
        let extractor = ScrapeExtractor::new(vec![
            Stage::new(untouched("scrape"), 100),
            Stage::new(untouched("simplified-scrape"), 100),
        ]);
        let err = extractor.extract("not a url").await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl(_)));
    }

    #[test]
    fn builds_both_scrapers_from_config() {
        let config = Config::new(
            Url::parse("https://en.wikipedia.org/w/api.php").unwrap(),
            Url::parse("https://en.wikipedia.org/api/rest_v1").unwrap(),
        );
        let extractor = ScrapeExtractor::from_config(&config).unwrap();
        assert_eq!(extractor.stage_names(), vec!["scrape", "simplified-scrape"]);
    }
}
