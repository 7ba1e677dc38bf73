//! Gemini `generateContent` integration used to summarize comment sets.

use async_trait::async_trait;
use thiserror::Error;

mod client;
mod prompt;

pub use client::{DEFAULT_MODEL, GEMINI_API_BASE_URL, GeminiClient};
pub use prompt::SUMMARIZE_COMMENTS_PROMPT;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Gemini API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Gemini API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini API returned no text")]
    EmptyResponse,
}

/// Turns an ordered list of serialized comment records into prose.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, records: &[String]) -> Result<String, SummarizerError>;
}
