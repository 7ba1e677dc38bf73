//! Access to Instagram accounts, posts and comments.
//!
//! Instagram has no public API for this, so the session-holding private API
//! client runs as a separate bridge service. [`InstagramApi`] is the seam the
//! rest of the workspace depends on; [`HttpInstagramClient`] talks to the
//! bridge over plain JSON.

use async_trait::async_trait;
use domain::{InstagramComment, InstagramMedia, InstagramUser};
use thiserror::Error;

mod client;
mod wire;

pub use client::HttpInstagramClient;

#[derive(Debug, Error)]
pub enum InstagramError {
    /// The bridge answered with a non-2xx status
    #[error("Instagram bridge returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Instagram bridge request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait InstagramApi: Send + Sync {
    async fn search_users(&self, query: &str) -> Result<Vec<InstagramUser>, InstagramError>;

    /// Every post of the account, newest first
    async fn user_medias(&self, user_id: &str) -> Result<Vec<InstagramMedia>, InstagramError>;

    async fn media_comments(&self, media_id: &str) -> Result<Vec<InstagramComment>, InstagramError>;
}
