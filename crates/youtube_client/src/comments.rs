use crate::{YouTubeApi, YouTubeError};
use domain::Comment;
use tracing::{debug, info};

/// `maxResults` requested for every `commentThreads` page
pub const COMMENT_PAGE_SIZE: usize = 100;

/// Fetch every comment thread of a video, following continuation tokens
/// until the API stops returning one. Pages are concatenated in the order
/// they were received.
pub async fn fetch_all_comments(
    api: &dyn YouTubeApi,
    video_id: &str,
) -> Result<Vec<Comment>, YouTubeError> {
    let mut comments = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = api.comment_threads(video_id, page_token.as_deref()).await?;
        pages += 1;
        debug!(video_id, page = pages, items = page.comments.len(), "fetched comment page");
        comments.extend(page.comments);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    info!(video_id, pages, comments = comments.len(), "fetched all comments");
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HttpYouTubeClient, SubscriptionLookup};
    use crate::CommentThreadPage;
    use async_trait::async_trait;
    use domain::{SearchResults, SearchScope, VideoDetails};
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

    /// Serves pre-built pages and records the tokens it was asked for
    struct PagedFake {
        pages: Vec<CommentThreadPage>,
        requested: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl YouTubeApi for PagedFake {
        async fn comment_threads(
            &self,
            _video_id: &str,
            page_token: Option<&str>,
        ) -> Result<CommentThreadPage, YouTubeError> {
            let mut requested = self.requested.lock().unwrap();
            let index = requested.len();
            requested.push(page_token.map(str::to_string));
            Ok(self.pages[index].clone())
        }

        async fn subscriptions(&self, _: &str, _: &[String]) -> Result<SubscriptionLookup, YouTubeError> {
            unreachable!()
        }

        async fn search(&self, _: &str, _: SearchScope) -> Result<SearchResults, YouTubeError> {
            unreachable!()
        }

        async fn video(&self, _: &str) -> Result<Option<VideoDetails>, YouTubeError> {
            unreachable!()
        }
    }

    fn comment(id: usize) -> Comment {
        Comment {
            id: format!("c{id}"),
            text: format!("comment {id}"),
            author_display_name: format!("@user{id}"),
            author_channel_id: Some(format!("UC-{id}")),
            like_count: 0,
            replies: Vec::new(),
        }
    }

    #[tokio::test]
    async fn concatenates_pages_until_token_runs_out() {
        let fake = PagedFake {
            pages: vec![
                CommentThreadPage {
                    comments: (0..2).map(comment).collect(),
                    next_page_token: Some("p2".to_string()),
                },
                CommentThreadPage {
                    comments: (2..3).map(comment).collect(),
                    next_page_token: Some("p3".to_string()),
                },
                CommentThreadPage {
                    comments: (3..5).map(comment).collect(),
                    next_page_token: None,
                },
            ],
            requested: Mutex::new(Vec::new()),
        };

        let comments = fetch_all_comments(&fake, "vid").await.unwrap();

        let ids: Vec<_> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c0", "c1", "c2", "c3", "c4"]);
        assert_eq!(
            *fake.requested.lock().unwrap(),
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    /// Matches requests that carry no `pageToken` parameter
    struct FirstPage;

    impl Match for FirstPage {
        fn matches(&self, request: &Request) -> bool {
            !request.url.query_pairs().any(|(k, _)| k == "pageToken")
        }
    }

    fn thread_page(range: std::ops::Range<usize>, next: Option<&str>) -> Value {
        let items: Vec<Value> = range
            .map(|i| {
                json!({
                    "id": format!("t{i}"),
                    "snippet": { "topLevelComment": { "id": format!("t{i}"), "snippet": {
                        "textOriginal": format!("text {i}"),
                        "authorDisplayName": format!("@u{i}"),
                        "authorChannelId": { "value": format!("UC-{i}") },
                        "likeCount": i
                    }}}
                })
            })
            .collect();
        match next {
            Some(token) => json!({ "items": items, "nextPageToken": token }),
            None => json!({ "items": items }),
        }
    }

    #[tokio::test]
    async fn two_pages_of_100_and_50_yield_150_in_page_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(FirstPage)
            .respond_with(ResponseTemplate::new(200).set_body_json(thread_page(0..100, Some("page-2"))))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("pageToken", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(thread_page(100..150, None)))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpYouTubeClient::new("k").with_base_url(server.uri());
        let comments = fetch_all_comments(&client, "vid").await.unwrap();

        assert_eq!(comments.len(), 150);
        assert_eq!(comments[0].id, "t0");
        assert_eq!(comments[99].id, "t99");
        assert_eq!(comments[100].id, "t100");
        assert_eq!(comments[149].id, "t149");
    }

    #[tokio::test]
    async fn upstream_failure_stops_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(FirstPage)
            .respond_with(ResponseTemplate::new(200).set_body_json(thread_page(0..3, Some("page-2"))))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("pageToken", "page-2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpYouTubeClient::new("k").with_base_url(server.uri());
        let err = fetch_all_comments(&client, "vid").await.unwrap_err();
        assert!(matches!(err, YouTubeError::Upstream { status: 500, .. }));
    }
}
