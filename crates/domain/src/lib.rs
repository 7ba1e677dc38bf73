use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level comment thread as fetched from the YouTube Data API.
///
/// Field names follow the response shape the frontend consumes
/// (`author`, `author_id`, `likes`), not the Rust field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    #[serde(rename = "author")]
    pub author_display_name: String,
    /// Missing for comments whose author channel no longer exists.
    #[serde(rename = "author_id")]
    pub author_channel_id: Option<String>,
    #[serde(rename = "likes")]
    pub like_count: u64,
    /// Replies in API response order.
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// A reply nested under a [`Comment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub text: String,
    #[serde(rename = "author")]
    pub author_display_name: String,
    #[serde(rename = "likes")]
    pub like_count: u64,
}

/// Persisted comment summary, keyed by video id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub summary: String,
    pub updated_at: DateTime<Utc>,
}

impl VideoSummary {
    pub fn new(video_id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            summary: summary.into(),
            updated_at: Utc::now(),
        }
    }
}

/// Which resource kinds a search should return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    All,
    #[serde(alias = "video")]
    Videos,
    #[serde(alias = "channel")]
    Channels,
}

impl SearchScope {
    /// Value for the `type` query parameter of the search endpoint
    pub fn as_api_type(&self) -> &'static str {
        match self {
            SearchScope::All => "video,channel",
            SearchScope::Videos => "video",
            SearchScope::Channels => "channel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub published_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub videos: Vec<VideoResult>,
    pub channels: Vec<ChannelResult>,
}

/// Snippet and statistics of a single video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: String,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

/// An Instagram account returned by a user search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstagramUser {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub profile_pic_url: Option<String>,
}

/// A post (image, video, reel or carousel) of an Instagram account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstagramMedia {
    pub id: String,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Only set for videos and reels
    pub video_url: Option<String>,
    pub comment_count: u64,
    pub like_count: u64,
    pub play_count: Option<u64>,
    /// ISO 8601 publication time
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstagramComment {
    pub id: String,
    pub text: String,
    pub timestamp: String,
    pub username: String,
}
