//! Objects as the bridge serializes them (private API field names).

use domain::{InstagramComment, InstagramMedia, InstagramUser};
use serde::Deserialize;

/// Primary keys come back as strings or numbers depending on the endpoint
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Pk {
    Text(String),
    Number(u64),
}

impl From<Pk> for String {
    fn from(pk: Pk) -> Self {
        match pk {
            Pk::Text(text) => text,
            Pk::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserShort {
    pub pk: Pk,
    pub username: String,
    pub full_name: Option<String>,
    pub profile_pic_url: Option<String>,
}

impl From<UserShort> for InstagramUser {
    fn from(user: UserShort) -> Self {
        InstagramUser {
            id: user.pk.into(),
            username: user.username,
            full_name: user.full_name.filter(|n| !n.is_empty()),
            profile_pic_url: user.profile_pic_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Media {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption_text: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub like_count: u64,
    pub play_count: Option<u64>,
    pub taken_at: String,
}

impl From<Media> for InstagramMedia {
    fn from(media: Media) -> Self {
        InstagramMedia {
            id: media.id,
            title: media.title.filter(|t| !t.is_empty()),
            caption: media.caption_text.filter(|c| !c.is_empty()),
            thumbnail_url: media.thumbnail_url,
            video_url: media.video_url,
            comment_count: media.comment_count,
            like_count: media.like_count,
            play_count: media.play_count,
            timestamp: media.taken_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Comment {
    pub pk: Pk,
    #[serde(default)]
    pub text: String,
    pub created_at_utc: String,
    pub user: CommentUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentUser {
    pub username: String,
}

impl From<Comment> for InstagramComment {
    fn from(comment: Comment) -> Self {
        InstagramComment {
            id: comment.pk.into(),
            text: comment.text,
            timestamp: comment.created_at_utc,
            username: comment.user.username,
        }
    }
}

/// `{"detail": ...}` or `{"message": ...}` error bodies
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
    pub message: Option<String>,
}
