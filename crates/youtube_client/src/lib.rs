//! Typed access to the parts of the YouTube Data API v3 this backend uses.
//!
//! [`YouTubeApi`] is the seam the rest of the workspace depends on;
//! [`HttpYouTubeClient`] is the production implementation. Pagination and the
//! subscription rule live in free functions on top of the trait so they can be
//! exercised against fakes.

use async_trait::async_trait;
use domain::{Comment, SearchResults, SearchScope, VideoDetails};
use thiserror::Error;

mod client;
pub mod comments;
pub mod subscriptions;
mod wire;

pub use client::{HttpYouTubeClient, YOUTUBE_API_BASE_URL};
pub use comments::{COMMENT_PAGE_SIZE, fetch_all_comments};
pub use subscriptions::{SubscriptionMatch, SubscriptionStatus, check_subscription};

#[derive(Debug, Error)]
pub enum YouTubeError {
    /// The API answered with a non-2xx status
    #[error("YouTube API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("YouTube API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One page of `commentThreads`
#[derive(Debug, Clone, Default)]
pub struct CommentThreadPage {
    pub comments: Vec<Comment>,
    /// `None` when this is the last page
    pub next_page_token: Option<String>,
}

/// Outcome of a raw `subscriptions` lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionLookup {
    /// 403: the author's subscriptions are not visible to us
    Hidden,
    /// Any other 4xx: the lookup itself was rejected for this author
    /// (terminated channel, malformed id)
    Unavailable { status: u16, message: String },
    /// Channel ids of the matching subscription records, in response order
    Found(Vec<String>),
}

#[async_trait]
pub trait YouTubeApi: Send + Sync {
    /// Fetch one page of top-level comment threads ordered by relevance
    async fn comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadPage, YouTubeError>;

    /// Look up which of `channel_ids` the author is subscribed to
    async fn subscriptions(
        &self,
        author_channel_id: &str,
        channel_ids: &[String],
    ) -> Result<SubscriptionLookup, YouTubeError>;

    async fn search(&self, query: &str, scope: SearchScope) -> Result<SearchResults, YouTubeError>;

    /// `Ok(None)` when the id matches no video
    async fn video(&self, video_id: &str) -> Result<Option<VideoDetails>, YouTubeError>;
}
