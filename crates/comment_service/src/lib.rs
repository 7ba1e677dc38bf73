//! Comment retrieval, random picking and cached summarization for a video.
//!
//! [`CommentService`] owns no clients of its own: the YouTube API, the
//! summarizer and the summary repository are injected, so every external
//! call can be replaced by a fake.

use datastore::{PersistenceError, SummaryRepository};
use domain::{Comment, SearchResults, SearchScope, VideoDetails};
use gemini_client::{Summarizer, SummarizerError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use youtube_client::{SubscriptionMatch, YouTubeApi, YouTubeError, fetch_all_comments};

mod selection;
mod summary;
#[cfg(test)]
mod testing;

pub use summary::{cap_top_liked, format_comment_record};

/// Comments sent to the summarizer when a video has more than this many
pub const DEFAULT_SUMMARY_COMMENT_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Upstream(#[from] YouTubeError),

    #[error(transparent)]
    Summarizer(#[from] SummarizerError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("{0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone)]
pub struct CommentSettings {
    /// Top-N cap applied (by like count) before summarizing
    pub summary_comment_limit: usize,
    pub subscription_match: SubscriptionMatch,
}

impl Default for CommentSettings {
    fn default() -> Self {
        Self {
            summary_comment_limit: DEFAULT_SUMMARY_COMMENT_LIMIT,
            subscription_match: SubscriptionMatch::default(),
        }
    }
}

/// Everything the video page shows in one response
#[derive(Debug, Clone, Serialize)]
pub struct VideoOverview {
    pub video: VideoDetails,
    pub comments: Vec<Comment>,
    /// `None` when the video has no comments and nothing was cached
    pub summary: Option<String>,
}

pub struct CommentService {
    youtube: Arc<dyn YouTubeApi>,
    summarizer: Arc<dyn Summarizer>,
    summaries: Arc<dyn SummaryRepository>,
    settings: CommentSettings,
}

impl CommentService {
    pub fn new(
        youtube: Arc<dyn YouTubeApi>,
        summarizer: Arc<dyn Summarizer>,
        summaries: Arc<dyn SummaryRepository>,
        settings: CommentSettings,
    ) -> Self {
        Self {
            youtube,
            summarizer,
            summaries,
            settings,
        }
    }

    pub fn settings(&self) -> &CommentSettings {
        &self.settings
    }

    pub async fn search(&self, query: &str, scope: SearchScope) -> Result<SearchResults, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::InvalidInput("search query must not be empty".to_string()));
        }
        let results = self.youtube.search(query, scope).await?;
        info!(query, ?scope, videos = results.videos.len(), channels = results.channels.len(), "search done");
        Ok(results)
    }

    /// All comment threads of a video, in fetch order
    pub async fn fetch_comments(&self, video_id: &str) -> Result<Vec<Comment>, ServiceError> {
        let video_id = require_video_id(video_id)?;
        Ok(fetch_all_comments(self.youtube.as_ref(), video_id).await?)
    }

    /// Video details, every comment and the summary (cached or freshly built
    /// from the comments fetched here).
    pub async fn video_overview(&self, video_id: &str) -> Result<VideoOverview, ServiceError> {
        let video_id = require_video_id(video_id)?;
        let video = self
            .youtube
            .video(video_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("video '{video_id}' not found")))?;

        let comments = self.fetch_comments(video_id).await?;
        let summary = match self.cached_summary(video_id)? {
            Some(summary) => Some(summary),
            None if comments.is_empty() => None,
            None => Some(self.build_summary(video_id, &comments).await?),
        };

        Ok(VideoOverview {
            video,
            comments,
            summary,
        })
    }
}

fn require_video_id(video_id: &str) -> Result<&str, ServiceError> {
    let video_id = video_id.trim();
    if video_id.is_empty() {
        return Err(ServiceError::InvalidInput("video id must not be empty".to_string()));
    }
    Ok(video_id)
}
