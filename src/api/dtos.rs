use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{pipeline::Extraction, resolver::resolve};

const MAX_URL_LENGTH: usize = 2048;
const PREVIEW_LENGTH: usize = 200;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractRequest {
    /// Full Wikipedia article URL, e.g. `https://en.wikipedia.org/wiki/Rocket`.
    pub url: String,
}

impl ExtractRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("URL cannot be empty".to_string());
        }
        if self.url.len() > MAX_URL_LENGTH {
            return Err("URL too long".to_string());
        }
        resolve(&self.url).map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtractResponse {
    pub success: bool,
    pub content: String,
    pub content_length: usize,
    pub content_preview: String,
    pub url: String,
    pub fallback_used: bool,
    pub message: Option<String>,
}

impl ExtractResponse {
    pub fn new(url: String, extraction: Extraction) -> Self {
        let content = extraction.document.into_text();
        Self {
            success: true,
            content_length: content.chars().count(),
            content_preview: preview(&content),
            content,
            url,
            fallback_used: extraction.used_fallback,
            message: extraction.message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScrapeResponse {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
