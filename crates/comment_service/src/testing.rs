//! Fakes for the injected collaborators of [`CommentService`].

use crate::{CommentService, CommentSettings};
use async_trait::async_trait;
use datastore::SummaryRepository;
use domain::{Comment, SearchResults, SearchScope, VideoDetails};
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use gemini_client::{Summarizer, SummarizerError};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::Arc;
use youtube_client::{CommentThreadPage, SubscriptionLookup, YouTubeApi, YouTubeError};

pub(crate) fn comment(id: &str, author_channel_id: &str, like_count: u64) -> Comment {
    Comment {
        id: id.to_string(),
        text: format!("text of {id}"),
        author_display_name: format!("@{author_channel_id}"),
        author_channel_id: Some(author_channel_id.to_string()),
        like_count,
        replies: Vec::new(),
    }
}

/// `count` comments by distinct authors with generated names and text
pub(crate) fn generated_comments(count: usize) -> Vec<Comment> {
    (0..count)
        .map(|i| Comment {
            id: format!("gen-{i}"),
            text: Sentence(3..12).fake(),
            author_display_name: Name().fake(),
            author_channel_id: Some(format!("UC-gen-{i}")),
            like_count: (0..1000u64).fake(),
            replies: Vec::new(),
        })
        .collect()
}

pub(crate) fn service(
    youtube: Arc<FakeYouTube>,
    summarizer: Arc<FakeSummarizer>,
    summaries: Arc<dyn SummaryRepository>,
) -> CommentService {
    CommentService::new(youtube, summarizer, summaries, CommentSettings::default())
}

/// Serves one fixed comment page and answers subscription lookups from a
/// table of author -> subscribed channels.
pub(crate) struct FakeYouTube {
    comments: Vec<Comment>,
    video_ids: HashSet<String>,
    subscribers: HashMap<String, Vec<String>>,
    hidden: HashSet<String>,
    unavailable: HashSet<String>,
    fail_subscriptions: bool,
    comment_page_calls: Mutex<usize>,
    subscription_calls: Mutex<Vec<String>>,
}

impl FakeYouTube {
    pub(crate) fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            video_ids: HashSet::new(),
            subscribers: HashMap::new(),
            hidden: HashSet::new(),
            unavailable: HashSet::new(),
            fail_subscriptions: false,
            comment_page_calls: Mutex::new(0),
            subscription_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_video(mut self, video_id: &str) -> Self {
        self.video_ids.insert(video_id.to_string());
        self
    }

    pub(crate) fn with_subscriber(mut self, author: &str, channels: &[&str]) -> Self {
        self.subscribers.insert(
            author.to_string(),
            channels.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub(crate) fn with_hidden(mut self, author: &str) -> Self {
        self.hidden.insert(author.to_string());
        self
    }

    /// Lookups for `author` are rejected with a 404, like a terminated channel
    pub(crate) fn with_unavailable(mut self, author: &str) -> Self {
        self.unavailable.insert(author.to_string());
        self
    }

    pub(crate) fn failing_subscriptions(mut self) -> Self {
        self.fail_subscriptions = true;
        self
    }

    pub(crate) fn comment_page_calls(&self) -> usize {
        *self.comment_page_calls.lock().unwrap()
    }

    pub(crate) fn subscription_calls(&self) -> Vec<String> {
        self.subscription_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl YouTubeApi for FakeYouTube {
    async fn comment_threads(
        &self,
        _video_id: &str,
        _page_token: Option<&str>,
    ) -> Result<CommentThreadPage, YouTubeError> {
        *self.comment_page_calls.lock().unwrap() += 1;
        Ok(CommentThreadPage {
            comments: self.comments.clone(),
            next_page_token: None,
        })
    }

    async fn subscriptions(
        &self,
        author_channel_id: &str,
        channel_ids: &[String],
    ) -> Result<SubscriptionLookup, YouTubeError> {
        self.subscription_calls
            .lock()
            .unwrap()
            .push(author_channel_id.to_string());

        if self.fail_subscriptions {
            return Err(YouTubeError::Upstream {
                status: 500,
                message: "backendError".to_string(),
            });
        }
        if self.hidden.contains(author_channel_id) {
            return Ok(SubscriptionLookup::Hidden);
        }
        if self.unavailable.contains(author_channel_id) {
            return Ok(SubscriptionLookup::Unavailable {
                status: 404,
                message: "subscriberNotFound".to_string(),
            });
        }
        let subscribed = self
            .subscribers
            .get(author_channel_id)
            .map(|subs| {
                channel_ids
                    .iter()
                    .filter(|c| subs.contains(c))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(SubscriptionLookup::Found(subscribed))
    }

    async fn search(&self, _query: &str, _scope: SearchScope) -> Result<SearchResults, YouTubeError> {
        Ok(SearchResults::default())
    }

    async fn video(&self, video_id: &str) -> Result<Option<VideoDetails>, YouTubeError> {
        Ok(self.video_ids.contains(video_id).then(|| VideoDetails {
            id: video_id.to_string(),
            title: format!("Video {video_id}"),
            description: String::new(),
            thumbnail_url: String::new(),
            channel_id: "UC-main".to_string(),
            channel_title: "Main".to_string(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
            view_count: Some(10),
            like_count: Some(2),
            comment_count: Some(self.comments.len() as u64),
        }))
    }
}

/// Returns a canned reply (or error) and records what it was sent
pub(crate) struct FakeSummarizer {
    reply: Option<String>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeSummarizer {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn last_records(&self) -> Vec<String> {
        self.calls.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, records: &[String]) -> Result<String, SummarizerError> {
        self.calls.lock().unwrap().push(records.to_vec());
        self.reply.clone().ok_or(SummarizerError::Upstream {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }
}
