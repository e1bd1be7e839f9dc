//! Mention report: who got mentioned, by whom, in which tweets

use serde::Serialize;
use tweetnet_core::Accumulator;

use super::rank_by;
use crate::ordered::{OrderedMap, serialize_values};
use crate::record::Record;

/// Tweets in which one author mentioned the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionGroup {
    pub mention_by: String,
    pub tweets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionedUser {
    pub username: String,
    pub received_mentions: u64,
    /// One group per mentioning author, first-seen order
    #[serde(serialize_with = "serialize_values")]
    pub mentions: OrderedMap<String, MentionGroup>,
}

impl MentionedUser {
    fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            received_mentions: 0,
            mentions: OrderedMap::new(),
        }
    }

    pub fn by(&self, author: &str) -> Option<&MentionGroup> {
        self.mentions.get(author)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentionReport {
    pub mentions: Vec<MentionedUser>,
}

impl MentionReport {
    pub fn user(&self, username: &str) -> Option<&MentionedUser> {
        self.mentions.iter().find(|u| u.username == username)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentionReportBuilder {
    users: OrderedMap<String, MentionedUser>,
}

impl MentionReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, mentioned: &str, author: &str, tweet_id: &str) {
        let user = self
            .users
            .upsert_with(mentioned, || MentionedUser::new(mentioned));
        let group = user.mentions.upsert_with(author, || MentionGroup {
            mention_by: author.to_string(),
            tweets: Vec::new(),
        });
        group.tweets.push(tweet_id.to_string());
        user.received_mentions += 1;
    }

    pub fn finish(self) -> MentionReport {
        let mut mentions = self.users.into_values();
        rank_by(&mut mentions, |u| u.received_mentions);
        MentionReport { mentions }
    }
}

impl Accumulator for MentionReportBuilder {
    type Item = Record;

    fn push(&mut self, record: &Record) {
        if record.is_repost() {
            return;
        }
        let Some(author) = &record.author else {
            return;
        };
        for mentioned in &record.mentioned_users {
            self.add(mentioned, author, &record.id);
        }
    }

    fn merge(&mut self, other: Self) {
        for (mentioned, user) in other.users {
            for (author, group) in user.mentions {
                for tweet_id in &group.tweets {
                    self.add(&mentioned, &author, tweet_id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{post, repost};

    fn build(records: &[Record]) -> MentionReportBuilder {
        let mut b = MentionReportBuilder::new();
        for r in records {
            b.push(r);
        }
        b
    }

    #[test]
    fn groups_by_mentioning_author() {
        let report = build(&[
            post("alice", "1", &["bob"]),
            post("alice", "2", &["bob", "carol"]),
            post("dave", "3", &["bob"]),
        ])
        .finish();

        let bob = report.user("bob").unwrap();
        assert_eq!(bob.received_mentions, 3);
        assert_eq!(bob.mentions.len(), 2);
        assert_eq!(bob.by("alice").unwrap().tweets, vec!["1", "2"]);
        assert_eq!(bob.by("dave").unwrap().tweets, vec!["3"]);
        assert_eq!(report.user("carol").unwrap().received_mentions, 1);
    }

    #[test]
    fn repeated_tweet_ids_are_not_deduplicated() {
        let report = build(&[post("alice", "1", &["bob"]), post("alice", "1", &["bob"])]).finish();
        let bob = report.user("bob").unwrap();
        assert_eq!(bob.received_mentions, 2);
        assert_eq!(bob.by("alice").unwrap().tweets, vec!["1", "1"]);
    }

    #[test]
    fn reposts_do_not_count_as_mentions() {
        let mut rt = repost("alice", "bob", "10");
        rt.mentioned_users = vec!["bob".into()];
        assert!(build(&[rt]).finish().mentions.is_empty());
    }

    #[test]
    fn ranked_by_received_mentions() {
        let report = build(&[
            post("a", "1", &["low"]),
            post("a", "2", &["high"]),
            post("b", "3", &["high"]),
        ])
        .finish();
        let order: Vec<&str> = report.mentions.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(order, vec!["high", "low"]);
    }

    #[test]
    fn merge_concatenates_tweet_lists() {
        let records = vec![
            post("alice", "1", &["bob"]),
            post("carol", "2", &["bob"]),
            post("alice", "3", &["bob", "dave"]),
        ];
        let whole = build(&records).finish();
        let mut merged = build(&records[..1]);
        merged.merge(build(&records[1..]));
        let merged = merged.finish();
        assert_eq!(merged, whole);
        assert_eq!(merged.user("bob").unwrap().by("alice").unwrap().tweets, vec!["1", "3"]);
    }

    #[test]
    fn serializes_groups_as_list() {
        let report = build(&[post("alice", "1", &["bob"])]).finish();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mentions": [{
                    "username": "bob",
                    "receivedMentions": 1,
                    "mentions": [{"mentionBy": "alice", "tweets": ["1"]}]
                }]
            })
        );
    }
}
