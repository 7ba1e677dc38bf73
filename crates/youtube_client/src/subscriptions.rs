use crate::{SubscriptionLookup, YouTubeApi, YouTubeError};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// How a subscription lookup is turned into a pass/fail decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionMatch {
    /// Pass when the number of returned records equals the number of
    /// requested channels. Cheap, but trusts the API not to return
    /// duplicates or unrelated records.
    #[default]
    CountEquality,
    /// Pass when every requested channel id appears in the returned records.
    EveryChannel,
}

impl std::str::FromStr for SubscriptionMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" | "count_equality" => Ok(Self::CountEquality),
            "every" | "every_channel" => Ok(Self::EveryChannel),
            other => Err(format!("unknown subscription match rule '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Subscribed,
    NotSubscribed,
    /// The author's subscriptions are private; we cannot tell either way
    Hidden,
    /// The lookup was rejected for this author (4xx other than 403)
    Unavailable,
}

impl SubscriptionStatus {
    /// Only a confirmed subscription passes
    pub fn passes(self) -> bool {
        matches!(self, SubscriptionStatus::Subscribed)
    }
}

/// Check whether `author_channel_id` is subscribed to every channel in
/// `channel_ids` with a single lookup. Duplicate ids are collapsed first.
pub async fn check_subscription(
    api: &dyn YouTubeApi,
    author_channel_id: &str,
    channel_ids: &[String],
    rule: SubscriptionMatch,
) -> Result<SubscriptionStatus, YouTubeError> {
    let mut seen = HashSet::new();
    let targets: Vec<String> = channel_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect();

    let status = match api.subscriptions(author_channel_id, &targets).await? {
        SubscriptionLookup::Hidden => SubscriptionStatus::Hidden,
        SubscriptionLookup::Unavailable { status, message } => {
            warn!(author = author_channel_id, status, %message, "subscription lookup rejected");
            SubscriptionStatus::Unavailable
        }
        SubscriptionLookup::Found(found) => {
            let subscribed = match rule {
                SubscriptionMatch::CountEquality => found.len() == targets.len(),
                SubscriptionMatch::EveryChannel => {
                    let found: HashSet<&str> = found.iter().map(String::as_str).collect();
                    targets.iter().all(|t| found.contains(t.as_str()))
                }
            };
            if subscribed {
                SubscriptionStatus::Subscribed
            } else {
                SubscriptionStatus::NotSubscribed
            }
        }
    };

    debug!(author = author_channel_id, targets = targets.len(), ?status, "subscription checked");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommentThreadPage;
    use async_trait::async_trait;
    use domain::{SearchResults, SearchScope, VideoDetails};
    use std::sync::Mutex;

    struct FixedLookup {
        lookup: SubscriptionLookup,
        requested: Mutex<Vec<Vec<String>>>,
    }

    impl FixedLookup {
        fn new(lookup: SubscriptionLookup) -> Self {
            Self { lookup, requested: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl YouTubeApi for FixedLookup {
        async fn comment_threads(&self, _: &str, _: Option<&str>) -> Result<CommentThreadPage, YouTubeError> {
            unreachable!()
        }

        async fn subscriptions(
            &self,
            _author: &str,
            channel_ids: &[String],
        ) -> Result<SubscriptionLookup, YouTubeError> {
            self.requested.lock().unwrap().push(channel_ids.to_vec());
            Ok(self.lookup.clone())
        }

        async fn search(&self, _: &str, _: SearchScope) -> Result<SearchResults, YouTubeError> {
            unreachable!()
        }

        async fn video(&self, _: &str) -> Result<Option<VideoDetails>, YouTubeError> {
            unreachable!()
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn count_equality_passes_when_counts_match() {
        let api = FixedLookup::new(SubscriptionLookup::Found(ids(&["UC-1", "UC-2"])));
        let status = check_subscription(&api, "UC-a", &ids(&["UC-1", "UC-2"]), SubscriptionMatch::CountEquality)
            .await
            .unwrap();
        assert_eq!(status, SubscriptionStatus::Subscribed);
    }

    #[tokio::test]
    async fn partial_subscription_fails() {
        let api = FixedLookup::new(SubscriptionLookup::Found(ids(&["UC-1"])));
        let status = check_subscription(&api, "UC-a", &ids(&["UC-1", "UC-2"]), SubscriptionMatch::CountEquality)
            .await
            .unwrap();
        assert_eq!(status, SubscriptionStatus::NotSubscribed);
        assert!(!status.passes());
    }

    #[tokio::test]
    async fn every_channel_rejects_unrelated_records() {
        let api = FixedLookup::new(SubscriptionLookup::Found(ids(&["UC-1", "UC-9"])));
        let targets = ids(&["UC-1", "UC-2"]);

        let lenient = check_subscription(&api, "UC-a", &targets, SubscriptionMatch::CountEquality)
            .await
            .unwrap();
        let strict = check_subscription(&api, "UC-a", &targets, SubscriptionMatch::EveryChannel)
            .await
            .unwrap();

        assert_eq!(lenient, SubscriptionStatus::Subscribed);
        assert_eq!(strict, SubscriptionStatus::NotSubscribed);
    }

    #[tokio::test]
    async fn hidden_subscriptions_do_not_pass() {
        let api = FixedLookup::new(SubscriptionLookup::Hidden);
        let status = check_subscription(&api, "UC-a", &ids(&["UC-1"]), SubscriptionMatch::EveryChannel)
            .await
            .unwrap();
        assert_eq!(status, SubscriptionStatus::Hidden);
        assert!(!status.passes());
    }

    #[tokio::test]
    async fn rejected_lookup_does_not_pass() {
        let api = FixedLookup::new(SubscriptionLookup::Unavailable {
            status: 400,
            message: "invalid channel id".to_string(),
        });
        let status = check_subscription(&api, "not-a-channel", &ids(&["UC-1"]), SubscriptionMatch::CountEquality)
            .await
            .unwrap();
        assert_eq!(status, SubscriptionStatus::Unavailable);
        assert!(!status.passes());
    }

    #[tokio::test]
    async fn duplicate_targets_are_collapsed_before_lookup() {
        let api = FixedLookup::new(SubscriptionLookup::Found(ids(&["UC-1"])));
        let status = check_subscription(&api, "UC-a", &ids(&["UC-1", "UC-1"]), SubscriptionMatch::CountEquality)
            .await
            .unwrap();

        assert_eq!(status, SubscriptionStatus::Subscribed);
        assert_eq!(api.requested.lock().unwrap()[0], ids(&["UC-1"]));
    }

    #[test]
    fn match_rule_parses_from_config_strings() {
        assert_eq!("count".parse::<SubscriptionMatch>(), Ok(SubscriptionMatch::CountEquality));
        assert_eq!("EVERY".parse::<SubscriptionMatch>(), Ok(SubscriptionMatch::EveryChannel));
        assert!("any".parse::<SubscriptionMatch>().is_err());
    }
}
