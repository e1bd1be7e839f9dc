//! Retweet report: who got retweeted, which tweets, by whom

use rustc_hash::FxHashSet;
use serde::Serialize;
use tweetnet_core::Accumulator;

use super::rank_by;
use crate::ordered::OrderedMap;
use crate::record::Record;

/// Distinct reposters of one original tweet, in encounter order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetweetedTweet {
    pub retweeted_by: Vec<String>,
    #[serde(skip)]
    seen: FxHashSet<String>,
}

impl RetweetedTweet {
    /// Returns false when `reposter` was already recorded for this tweet.
    fn insert(&mut self, reposter: &str) -> bool {
        if !self.seen.insert(reposter.to_string()) {
            return false;
        }
        self.retweeted_by.push(reposter.to_string());
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetweetedUser {
    pub username: String,
    pub received_retweets: u64,
    /// Keyed by original tweet id
    pub tweets: OrderedMap<String, RetweetedTweet>,
}

impl RetweetedUser {
    fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            received_retweets: 0,
            tweets: OrderedMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetweetReport {
    pub retweets: Vec<RetweetedUser>,
}

impl RetweetReport {
    pub fn user(&self, username: &str) -> Option<&RetweetedUser> {
        self.retweets.iter().find(|u| u.username == username)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetweetReportBuilder {
    users: OrderedMap<String, RetweetedUser>,
}

impl RetweetReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `reposter` once per original tweet; duplicates are ignored.
    fn add(&mut self, original_author: &str, tweet_id: &str, reposter: &str) {
        let user = self
            .users
            .upsert_with(original_author, || RetweetedUser::new(original_author));
        let tweet = user.tweets.upsert_with(tweet_id, RetweetedTweet::default);
        if tweet.insert(reposter) {
            user.received_retweets += 1;
        }
    }

    pub fn finish(self) -> RetweetReport {
        let mut retweets = self.users.into_values();
        rank_by(&mut retweets, |u| u.received_retweets);
        RetweetReport { retweets }
    }
}

impl Accumulator for RetweetReportBuilder {
    type Item = Record;

    fn push(&mut self, record: &Record) {
        let Some(original) = &record.repost_of else {
            return;
        };
        if let Some((reposter, original_author)) = record.repost_pair() {
            self.add(original_author, &original.id, reposter);
        }
    }

    fn merge(&mut self, other: Self) {
        for (author, user) in other.users {
            for (tweet_id, tweet) in user.tweets {
                for reposter in &tweet.retweeted_by {
                    self.add(&author, &tweet_id, reposter);
                }
            }
        }
    }
}
