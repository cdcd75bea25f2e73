use std::sync::Arc;

use crate::{
    config::Config,
    fetcher::FetchError,
    pipeline::{CascadeExtractor, ScrapeExtractor},
};

#[derive(Clone)]
pub struct AppState {
    pub cascade: Arc<CascadeExtractor>,
    pub scraper: Arc<ScrapeExtractor>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Ok(Self {
            cascade: Arc::new(CascadeExtractor::from_config(config)?),
            scraper: Arc::new(ScrapeExtractor::from_config(config)?),
        })
    }
}
