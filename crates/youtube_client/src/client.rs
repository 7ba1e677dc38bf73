use crate::wire::{
    CommentThreadListResponse, ErrorEnvelope, SearchHit, SearchListResponse,
    SubscriptionListResponse, VideoListResponse,
};
use crate::{
    COMMENT_PAGE_SIZE, CommentThreadPage, SubscriptionLookup, YouTubeApi, YouTubeError,
};
use async_trait::async_trait;
use domain::{Comment, SearchResults, SearchScope, VideoDetails};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Largest page the search and subscriptions endpoints accept
const MAX_PAGE_SIZE: &str = "50";

/// YouTube Data API client authenticated with an API key
#[derive(Clone)]
pub struct HttpYouTubeClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpYouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: YOUTUBE_API_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at another host (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies)
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    async fn send(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response, YouTubeError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;
        debug!(endpoint, status = %response.status(), "YouTube API response");
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, YouTubeError> {
        let response = self.send(endpoint, query).await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, YouTubeError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(YouTubeError::Upstream {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }
    Ok(response.json().await?)
}

/// Best-effort extraction of a human readable message from an error body
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = envelope.error.message.filter(|m| !m.is_empty()) {
            return message;
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

#[async_trait]
impl YouTubeApi for HttpYouTubeClient {
    async fn comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadPage, YouTubeError> {
        let page_size = COMMENT_PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet,id,replies"),
            ("videoId", video_id),
            ("maxResults", page_size.as_str()),
            ("order", "relevance"),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let page: CommentThreadListResponse = self.get_json("commentThreads", &query).await?;
        Ok(CommentThreadPage {
            comments: page.items.into_iter().map(Comment::from).collect(),
            next_page_token: page.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn subscriptions(
        &self,
        author_channel_id: &str,
        channel_ids: &[String],
    ) -> Result<SubscriptionLookup, YouTubeError> {
        let for_channels = channel_ids.join(",");
        let query = [
            ("part", "snippet"),
            ("channelId", author_channel_id),
            ("forChannelId", for_channels.as_str()),
            ("maxResults", MAX_PAGE_SIZE),
        ];

        let response = self.send("subscriptions", &query).await?;
        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Ok(SubscriptionLookup::Hidden);
        }
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Ok(SubscriptionLookup::Unavailable {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        let list: SubscriptionListResponse = read_json(response).await?;
        Ok(SubscriptionLookup::Found(
            list.items.into_iter().map(|s| s.channel_id()).collect(),
        ))
    }

    async fn search(&self, query: &str, scope: SearchScope) -> Result<SearchResults, YouTubeError> {
        let params = [
            ("part", "snippet"),
            ("q", query),
            ("type", scope.as_api_type()),
            ("maxResults", MAX_PAGE_SIZE),
        ];
        let list: SearchListResponse = self.get_json("search", &params).await?;

        let mut results = SearchResults::default();
        for hit in list.items.into_iter().filter_map(|item| item.into_hit()) {
            match hit {
                SearchHit::Video(video) => results.videos.push(video),
                SearchHit::Channel(channel) => results.channels.push(channel),
            }
        }
        Ok(results)
    }

    async fn video(&self, video_id: &str) -> Result<Option<VideoDetails>, YouTubeError> {
        let params = [("part", "snippet,statistics"), ("id", video_id)];
        let list: VideoListResponse = self.get_json("videos", &params).await?;
        Ok(list.items.into_iter().next().map(VideoDetails::from))
    }
}
