pub mod api;
pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod pipeline;
pub mod resolver;

pub use extractor::{ExtractError, ExtractedDocument, ExtractionStrategy};
pub use pipeline::{CascadeExtractor, Extraction, ScrapeExtractor};
pub use resolver::{PageReference, resolve};
