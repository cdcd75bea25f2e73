//! Ordered cascades of extraction strategies.
//!
//! A cascade is a list of [`Stage`]s. Each stage runs at most once; any
//! failure, or a document shorter than the stage threshold, moves on to the
//! next one. What happens when every stage fails is up to the orchestrator:
//! [`CascadeExtractor`] substitutes static fallback content, while
//! [`ScrapeExtractor`] reports [`ExtractError::ExtractionFailed`].

pub mod cascade;
pub mod scrape;

pub use cascade::{CascadeExtractor, Extraction, Thresholds};
pub use scrape::ScrapeExtractor;

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    extractor::{ExtractError, ExtractedDocument, ExtractionStrategy},
    resolver::PageReference,
};

/// One strategy together with the minimum length its output must reach.
#[derive(Clone)]
pub struct Stage {
    strategy: Arc<dyn ExtractionStrategy>,
    min_length: usize,
}

impl Stage {
    pub fn new<S: ExtractionStrategy + 'static>(strategy: S, min_length: usize) -> Self {
        Self {
            strategy: Arc::new(strategy),
            min_length,
        }
    }

    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    async fn run(&self, page: &PageReference) -> Result<ExtractedDocument, ExtractError> {
        let document = self.strategy.extract(page).await?;
        document.ensure_min_length(self.min_length)?;
        Ok(document)
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("strategy", &self.strategy.name())
            .field("min_length", &self.min_length)
            .finish()
    }
}

/// Try `stages` in order and return the first sufficient document, or the
/// error of the last stage attempted.
pub async fn run_stages(
    stages: &[Stage],
    page: &PageReference,
) -> Result<ExtractedDocument, ExtractError> {
    let mut last_error = None;

    for stage in stages {
        match stage.run(page).await {
            Ok(document) => {
                info!(
                    "{} stage produced {} characters for {}",
                    stage.name(),
                    document.len(),
                    page.title()
                );
                return Ok(document);
            }
            Err(e) if !e.escalates() => {
                warn!("{} stage failed terminally: {}", stage.name(), e);
                return Err(e);
            }
            Err(e) => {
                warn!("{} stage failed, escalating: {}", stage.name(), e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| ExtractError::Extraction("no extraction stages configured".to_string())))
}
