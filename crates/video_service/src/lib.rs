use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use comment_service::{CommentService, ServiceError};
use domain::SearchScope;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use youtube_client::YouTubeError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub scope: SearchScope,
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    #[serde(default)]
    pub regenerate: bool,
}

#[derive(Debug, Deserialize)]
pub struct PickParams {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub needs_subscription: bool,
    /// Comma separated channel ids
    #[serde(default)]
    pub channels: String,
}

impl PickParams {
    fn channel_ids(&self) -> Vec<String> {
        self.channels
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// `{"response": ...}` envelope used by the search and video endpoints
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub response: T,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct PickResponse {
    pub comment: domain::Comment,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// HTTP rendering of a [`ServiceError`]
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

/// Malformed query strings get the same `{"message"}` body as every other error
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ServiceError::InvalidInput(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            // our API key was refused; keep 401 for the caller's own token
            ServiceError::Upstream(YouTubeError::Upstream { status: 401, .. }) => {
                StatusCode::BAD_GATEWAY
            }
            ServiceError::Upstream(YouTubeError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ServiceError::Upstream(YouTubeError::Transport(e)) if e.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ServiceError::Upstream(YouTubeError::Transport(_)) | ServiceError::Summarizer(_) => {
                StatusCode::BAD_GATEWAY
            }
            ServiceError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, %status, "request failed");
        }
        let body = ErrorResponse {
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

async fn search(
    State(service): State<Arc<CommentService>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<DataResponse<domain::SearchResults>> {
    let Query(params) = params?;
    let results = service.search(&params.q, params.scope).await?;
    Ok(Json(DataResponse { response: results }))
}

async fn video_overview(
    State(service): State<Arc<CommentService>>,
    Path(video_id): Path<String>,
) -> ApiResult<DataResponse<comment_service::VideoOverview>> {
    let overview = service.video_overview(&video_id).await?;
    Ok(Json(DataResponse { response: overview }))
}

async fn comment_summary(
    State(service): State<Arc<CommentService>>,
    Path(video_id): Path<String>,
    params: Result<Query<SummaryParams>, QueryRejection>,
) -> ApiResult<SummaryResponse> {
    let Query(params) = params?;
    let summary = service
        .get_or_build_summary(&video_id, params.regenerate)
        .await?;
    Ok(Json(SummaryResponse { summary }))
}

async fn pick_comment(
    State(service): State<Arc<CommentService>>,
    params: Result<Query<PickParams>, QueryRejection>,
) -> ApiResult<PickResponse> {
    let Query(params) = params?;
    let comment = service
        .pick_random_comment(&params.video_id, params.needs_subscription, &params.channel_ids())
        .await?;
    Ok(Json(PickResponse { comment }))
}

// Create the router for the YouTube comment API
pub fn create_router(service: Arc<CommentService>) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/video/{video_id}", get(video_overview))
        .route("/comments/summary/{video_id}", get(comment_summary))
        .route("/comments/pick", get(pick_comment))
        .with_state(service)
}
