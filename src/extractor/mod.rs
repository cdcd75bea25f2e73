pub mod cleaner;
pub mod errors;
pub mod fallback;
pub mod model;
pub mod scrape;
pub mod sections;
pub mod summary;

pub use errors::ExtractError;
pub use fallback::{FALLBACK_DOCUMENT, fallback_document};
pub use model::{EXCLUDED_SECTIONS, ExtractedDocument, SectionDescriptor};
pub use scrape::{PageScraper, ScrapeProfile};
pub use sections::SectionFetcher;
pub use summary::SummaryFetcher;

use async_trait::async_trait;

use crate::resolver::PageReference;

/// A way of turning a Wikipedia page into an [`ExtractedDocument`].
///
/// Implementations perform their own network calls and report any failure as
/// an [`ExtractError`]; deciding what happens next is up to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    async fn extract(&self, page: &PageReference) -> Result<ExtractedDocument, ExtractError>;

    /// Short name used in logs and fallback messages.
    fn name(&self) -> &'static str;
}
