use std::time::Duration;

use thiserror::Error;

use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid Wikipedia URL: {0}")]
    InvalidUrl(String),

    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("insufficient content ({length} characters, {required} required)")]
    InsufficientContent { length: usize, required: usize },

    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("failed to extract Wikipedia content: {0}")]
    ExtractionFailed(Box<ExtractError>),
}

impl ExtractError {
    /// Whether a cascade should move on to its next stage after this error.
    pub fn escalates(&self) -> bool {
        match self {
            // Terminal - nothing later in the cascade can fix these
            Self::InvalidUrl(_) => false,
            Self::ExtractionFailed(_) => false,

            Self::PageNotFound(_) => true,
            Self::InsufficientContent { .. } => true,
            Self::Timeout(_) => true,
            Self::Extraction(_) => true,
        }
    }
}

impl From<FetchError> for ExtractError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout(after) => Self::Timeout(after),
            other => Self::Extraction(other.to_string()),
        }
    }
}
