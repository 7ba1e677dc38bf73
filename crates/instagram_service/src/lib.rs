use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use domain::{InstagramComment, InstagramMedia, InstagramUser};
use instagram_client::{InstagramApi, InstagramError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct MediasParams {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentsParams {
    #[serde(default)]
    pub media_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Instagram(#[from] InstagramError),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            // the bridge lost its Instagram session; not the caller's fault
            ApiError::Instagram(InstagramError::Upstream { status: 401 | 403, .. }) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Instagram(InstagramError::Upstream { status, .. }) if *status < 500 => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Instagram(InstagramError::Transport(e)) if e.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ApiError::Instagram(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        }
        let body = ErrorResponse {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Ids end up in the bridge's URL path: digits, letters and `_` only
fn require_id<'a>(name: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::InvalidInput(format!("{name} must not be empty")));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ApiError::InvalidInput(format!("{name} is not a valid Instagram id")));
    }
    Ok(value)
}

async fn search_users(
    State(api): State<Arc<dyn InstagramApi>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Vec<InstagramUser>> {
    let Query(params) = params?;
    let query = params.q.trim();
    if query.is_empty() {
        return Err(ApiError::InvalidInput("search query must not be empty".to_string()));
    }
    let users = api.search_users(query).await?;
    info!(query, count = users.len(), "instagram users searched");
    Ok(Json(users))
}

async fn user_medias(
    State(api): State<Arc<dyn InstagramApi>>,
    params: Result<Query<MediasParams>, QueryRejection>,
) -> ApiResult<Vec<InstagramMedia>> {
    let Query(params) = params?;
    let user_id = require_id("user_id", &params.user_id)?;
    let medias = api.user_medias(user_id).await?;
    info!(user_id, count = medias.len(), "instagram medias fetched");
    Ok(Json(medias))
}

async fn media_comments(
    State(api): State<Arc<dyn InstagramApi>>,
    params: Result<Query<CommentsParams>, QueryRejection>,
) -> ApiResult<Vec<InstagramComment>> {
    let Query(params) = params?;
    let media_id = require_id("media_id", &params.media_id)?;
    let comments = api.media_comments(media_id).await?;
    info!(media_id, count = comments.len(), "instagram comments fetched");
    Ok(Json(comments))
}

// Create the router for the Instagram proxy
pub fn create_router(api: Arc<dyn InstagramApi>) -> Router {
    Router::new()
        .route("/search", get(search_users))
        .route("/medias", get(user_medias))
        .route("/comments", get(media_comments))
        .with_state(api)
}
