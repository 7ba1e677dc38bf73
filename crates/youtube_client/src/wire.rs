//! Response shapes of the YouTube Data API, reduced to the fields we read.

use domain::{ChannelResult, Comment, Reply, VideoDetails, VideoResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
    pub replies: Option<CommentThreadReplies>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadSnippet {
    pub top_level_comment: CommentResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadReplies {
    #[serde(default)]
    pub comments: Vec<CommentResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentResource {
    pub id: String,
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentSnippet {
    #[serde(default)]
    pub text_original: String,
    #[serde(default)]
    pub author_display_name: String,
    pub author_channel_id: Option<AuthorChannelId>,
    #[serde(default)]
    pub like_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorChannelId {
    pub value: String,
}

impl From<CommentThread> for Comment {
    fn from(thread: CommentThread) -> Self {
        let top = thread.snippet.top_level_comment.snippet;
        let replies = thread
            .replies
            .map(|r| r.comments)
            .unwrap_or_default()
            .into_iter()
            .map(|reply| Reply {
                id: reply.id,
                text: reply.snippet.text_original,
                author_display_name: reply.snippet.author_display_name,
                like_count: reply.snippet.like_count,
            })
            .collect();

        Comment {
            id: thread.id,
            text: top.text_original,
            author_display_name: top.author_display_name,
            author_channel_id: top.author_channel_id.map(|a| a.value),
            like_count: top.like_count,
            replies,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubscriptionListResponse {
    #[serde(default)]
    pub items: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Subscription {
    pub snippet: Option<SubscriptionSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubscriptionSnippet {
    pub resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceId {
    pub channel_id: Option<String>,
}

impl Subscription {
    /// Channel the subscription points at; empty when the snippet was not returned
    pub fn channel_id(self) -> String {
        self.snippet
            .and_then(|s| s.resource_id.channel_id)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    pub id: SearchResultId,
    pub snippet: ResourceSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResultId {
    pub kind: String,
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ResourceSnippet {
    pub published_at: String,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

impl Thumbnails {
    /// Largest available thumbnail URL
    pub fn best_url(self) -> String {
        self.high
            .or(self.medium)
            .or(self.default)
            .map(|t| t.url)
            .unwrap_or_default()
    }
}

pub(crate) enum SearchHit {
    Video(VideoResult),
    Channel(ChannelResult),
}

impl SearchResult {
    pub fn into_hit(self) -> Option<SearchHit> {
        let snippet = self.snippet;
        match self.id.kind.as_str() {
            "youtube#video" => Some(SearchHit::Video(VideoResult {
                id: self.id.video_id?,
                title: snippet.title,
                description: snippet.description,
                thumbnail_url: snippet.thumbnails.best_url(),
                channel_id: snippet.channel_id,
                channel_title: snippet.channel_title,
                published_at: snippet.published_at,
            })),
            "youtube#channel" => Some(SearchHit::Channel(ChannelResult {
                id: self.id.channel_id?,
                title: snippet.title,
                description: snippet.description,
                thumbnail_url: snippet.thumbnails.best_url(),
                published_at: snippet.published_at,
            })),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoResource {
    pub id: String,
    #[serde(default)]
    pub snippet: ResourceSnippet,
    pub statistics: Option<VideoStatistics>,
}

/// Counts arrive as decimal strings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

fn parse_count(value: Option<String>) -> Option<u64> {
    value.and_then(|v| v.parse().ok())
}

impl From<VideoResource> for VideoDetails {
    fn from(video: VideoResource) -> Self {
        let stats = video.statistics.unwrap_or_default();
        let snippet = video.snippet;
        VideoDetails {
            id: video.id,
            title: snippet.title,
            description: snippet.description,
            thumbnail_url: snippet.thumbnails.best_url(),
            channel_id: snippet.channel_id,
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
            view_count: parse_count(stats.view_count),
            like_count: parse_count(stats.like_count),
            comment_count: parse_count(stats.comment_count),
        }
    }
}

/// Google API error envelope: `{"error": {"code": 403, "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
