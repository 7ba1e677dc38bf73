use crate::wire::{self, ErrorBody, UserShort};
use crate::{InstagramApi, InstagramError};
use async_trait::async_trait;
use domain::{InstagramComment, InstagramMedia, InstagramUser};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Client for the Instagram bridge service
#[derive(Clone)]
pub struct HttpInstagramClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpInstagramClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Bearer token presented to the bridge
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, InstagramError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.http.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(path, %status, "Instagram bridge response");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InstagramError::Upstream {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        Ok(response.json().await?)
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.detail.or(parsed.message).filter(|m| !m.is_empty()) {
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
impl InstagramApi for HttpInstagramClient {
    async fn search_users(&self, query: &str) -> Result<Vec<InstagramUser>, InstagramError> {
        let users: Vec<UserShort> = self.get_json("users/search", &[("query", query)]).await?;
        Ok(users.into_iter().map(InstagramUser::from).collect())
    }

    async fn user_medias(&self, user_id: &str) -> Result<Vec<InstagramMedia>, InstagramError> {
        // amount=0 asks the bridge for every post
        let path = format!("users/{user_id}/medias");
        let medias: Vec<wire::Media> = self.get_json(&path, &[("amount", "0")]).await?;
        Ok(medias.into_iter().map(InstagramMedia::from).collect())
    }

    async fn media_comments(&self, media_id: &str) -> Result<Vec<InstagramComment>, InstagramError> {
        let path = format!("medias/{media_id}/comments");
        let comments: Vec<wire::Comment> = self.get_json(&path, &[("amount", "0")]).await?;
        Ok(comments.into_iter().map(InstagramComment::from).collect())
    }
}
