use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, instrument};
use url::Url;

use crate::{
    config::DEFAULT_MAX_CONTENT_LENGTH,
    extractor::{ExtractError, ExtractedDocument, ExtractionStrategy},
    fetcher::WikiClient,
    resolver::{PageReference, encode_title},
};

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    title: String,
    #[serde(default)]
    extract: String,
}

/// Single round trip to the REST summary endpoint.
#[derive(Debug, Clone)]
pub struct SummaryFetcher {
    client: WikiClient,
    rest_url: Url,
    max_length: usize,
}

impl SummaryFetcher {
    pub fn new(client: WikiClient, rest_url: Url) -> Self {
        Self {
            client,
            rest_url,
            max_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// `{rest_url}/page/summary/{title}`, with the title encoded as one path
    /// component.
    pub fn summary_url(&self, title: &str) -> Result<Url, ExtractError> {
        let base = self.rest_url.as_str().trim_end_matches('/');
        let raw = format!("{}/page/summary/{}", base, encode_title(title));
        Url::parse(&raw).map_err(|e| ExtractError::Extraction(e.to_string()))
    }
}

#[async_trait]
impl ExtractionStrategy for SummaryFetcher {
    #[instrument(skip_all, fields(title = %page.title()))]
    async fn extract(&self, page: &PageReference) -> Result<ExtractedDocument, ExtractError> {
        let url = self.summary_url(page.title())?;
        let summary: SummaryResponse = self.client.get_json(&url, &[]).await?;

        let document = ExtractedDocument::assemble(
            &format!("# {}\n\n{}", summary.title, summary.extract),
            self.max_length,
        );
        info!("summary endpoint returned {} characters", document.len());
        Ok(document)
    }

    fn name(&self) -> &'static str {
        "summary"
    }
}
