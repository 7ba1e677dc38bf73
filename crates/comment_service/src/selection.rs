use crate::{CommentService, ServiceError};
use domain::Comment;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, info};
use youtube_client::check_subscription;

const NO_MATCH: &str = "no comment satisfies the constraint";

/// Working set of a single selection call.
///
/// Rejecting an author drops every remaining comment by them, so an author
/// is checked at most once per call.
struct PickState {
    candidates: Vec<Comment>,
    rejected_authors: HashSet<Option<String>>,
}

impl PickState {
    fn new(candidates: Vec<Comment>) -> Self {
        Self {
            candidates,
            rejected_authors: HashSet::new(),
        }
    }

    /// Uniformly random index into the candidates, `None` once exhausted
    fn draw(&self) -> Option<usize> {
        if self.candidates.is_empty() {
            return None;
        }
        Some(rand::thread_rng().gen_range(0..self.candidates.len()))
    }

    fn author_of(&self, index: usize) -> Option<String> {
        self.candidates[index].author_channel_id.clone()
    }

    fn reject_author(&mut self, author: Option<String>) {
        self.candidates.retain(|c| c.author_channel_id != author);
        self.rejected_authors.insert(author);
    }

    fn take(mut self, index: usize) -> Comment {
        self.candidates.swap_remove(index)
    }
}

impl CommentService {
    /// Pick one comment of `video_id` at random.
    ///
    /// With `needs_subscription`, only authors subscribed to every channel in
    /// `channels` qualify; authors that fail the check are excluded and the
    /// draw is repeated until a match is found or no candidates remain.
    pub async fn pick_random_comment(
        &self,
        video_id: &str,
        needs_subscription: bool,
        channels: &[String],
    ) -> Result<Comment, ServiceError> {
        if needs_subscription && channels.is_empty() {
            return Err(ServiceError::InvalidInput(
                "at least one channel is required when a subscription is needed".to_string(),
            ));
        }

        let comments = self.fetch_comments(video_id).await?;
        let constraint = needs_subscription.then_some(channels);
        self.select_comment(comments, constraint).await
    }

    pub(crate) async fn select_comment(
        &self,
        comments: Vec<Comment>,
        required_channels: Option<&[String]>,
    ) -> Result<Comment, ServiceError> {
        let mut state = PickState::new(comments);

        loop {
            let Some(index) = state.draw() else {
                info!(rejected = state.rejected_authors.len(), "no comment left to pick");
                return Err(ServiceError::NotFound(NO_MATCH.to_string()));
            };

            let Some(channels) = required_channels else {
                return Ok(state.take(index));
            };

            let author = state.author_of(index);
            let passes = match author.as_deref() {
                Some(author_id) => check_subscription(
                    self.youtube.as_ref(),
                    author_id,
                    channels,
                    self.settings.subscription_match,
                )
                .await?
                .passes(),
                None => false,
            };

            if passes {
                info!(author = ?author, rejected = state.rejected_authors.len(), "picked subscribed comment");
                return Ok(state.take(index));
            }

            debug!(author = ?author, "author failed subscription check");
            state.reject_author(author);
        }
    }
}
