use crate::{CommentService, ServiceError, require_video_id};
use domain::{Comment, VideoSummary};
use serde_json::json;
use tracing::info;

/// Keep at most `limit` comments. When capping, comments are ranked by like
/// count (descending); the sort is stable so ties keep fetch order.
pub fn cap_top_liked(comments: &[Comment], limit: usize) -> Vec<&Comment> {
    let mut ranked: Vec<&Comment> = comments.iter().collect();
    if ranked.len() > limit {
        ranked.sort_by(|a, b| b.like_count.cmp(&a.like_count));
        ranked.truncate(limit);
    }
    ranked
}

/// One-line JSON record for the summarizer: author, text, likes and replies
pub fn format_comment_record(comment: &Comment) -> String {
    let replies: Vec<_> = comment
        .replies
        .iter()
        .map(|r| {
            json!({
                "author": r.author_display_name,
                "text": r.text,
                "likes": r.like_count,
            })
        })
        .collect();

    json!({
        "author": comment.author_display_name,
        "text": comment.text,
        "likes": comment.like_count,
        "replies": replies,
    })
    .to_string()
}

impl CommentService {
    /// Return the stored summary for `video_id`, or build and store a new
    /// one when none exists or `force_regenerate` is set.
    pub async fn get_or_build_summary(
        &self,
        video_id: &str,
        force_regenerate: bool,
    ) -> Result<String, ServiceError> {
        let video_id = require_video_id(video_id)?;
        if !force_regenerate {
            if let Some(summary) = self.cached_summary(video_id)? {
                return Ok(summary);
            }
        }

        let comments = self.fetch_comments(video_id).await?;
        if comments.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "video '{video_id}' has no comments to summarize"
            )));
        }
        self.build_summary(video_id, &comments).await
    }

    pub(crate) fn cached_summary(&self, video_id: &str) -> Result<Option<String>, ServiceError> {
        let cached = self.summaries.get_summary(video_id)?;
        if cached.is_some() {
            info!(video_id, "summary cache hit");
        }
        Ok(cached.map(|s| s.summary))
    }

    pub(crate) async fn build_summary(
        &self,
        video_id: &str,
        comments: &[Comment],
    ) -> Result<String, ServiceError> {
        let retained = cap_top_liked(comments, self.settings.summary_comment_limit);
        let records: Vec<String> = retained.into_iter().map(format_comment_record).collect();
        info!(video_id, total = comments.len(), sent = records.len(), "building summary");

        let summary = self.summarizer.summarize(&records).await?;
        self.summaries
            .upsert_summary(VideoSummary::new(video_id, summary.clone()))?;
        Ok(summary)
    }
}
