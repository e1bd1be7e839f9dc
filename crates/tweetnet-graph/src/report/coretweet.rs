//! Co-retweet report: pairs of authors retweeted by the same people.
//!
//! Accumulation only records, per reposter, the distinct authors they
//! reposted. Pairs are enumerated in [`CoRetweetReportBuilder::finish`], after
//! all partials are merged, since a reposter's authors can be spread across
//! workers.

use serde::Serialize;
use tweetnet_core::Accumulator;

use super::rank_by;
use crate::ordered::OrderedMap;
use crate::record::Record;

/// Unordered author pair, always stored with `u1 < u2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AuthorPair {
    pub u1: String,
    pub u2: String,
}

impl AuthorPair {
    pub fn new(a: &str, b: &str) -> Self {
        let (u1, u2) = if a <= b { (a, b) } else { (b, a) };
        Self {
            u1: u1.to_string(),
            u2: u2.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoRetweetPair {
    pub authors: AuthorPair,
    pub total_coretweets: u64,
    /// Distinct reposters of both authors, first-seen order
    pub retweeters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoRetweetReport {
    pub coretweets: Vec<CoRetweetPair>,
}

impl CoRetweetReport {
    pub fn pair(&self, a: &str, b: &str) -> Option<&CoRetweetPair> {
        let key = AuthorPair::new(a, b);
        self.coretweets.iter().find(|p| p.authors == key)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoRetweetReportBuilder {
    /// reposter → distinct authors reposted
    reposted: OrderedMap<String, OrderedMap<String, ()>>,
}

impl CoRetweetReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, reposter: &str, author: &str) {
        self.reposted
            .upsert_with(reposter, OrderedMap::new)
            .upsert_with(author, || ());
    }

    pub fn finish(self) -> CoRetweetReport {
        let mut pairs: OrderedMap<AuthorPair, CoRetweetPair> = OrderedMap::new();

        for (reposter, authors) in self.reposted.iter() {
            let authors: Vec<&String> = authors.keys().collect();
            for (i, first) in authors.iter().enumerate() {
                for second in &authors[i + 1..] {
                    let key = AuthorPair::new(first, second);
                    let entry = pairs.upsert_with(&key, || CoRetweetPair {
                        authors: key.clone(),
                        total_coretweets: 0,
                        retweeters: Vec::new(),
                    });
                    // Each reposter visits a given pair once
                    entry.retweeters.push(reposter.clone());
                    entry.total_coretweets += 1;
                }
            }
        }

        let mut coretweets = pairs.into_values();
        rank_by(&mut coretweets, |p| p.total_coretweets);
        CoRetweetReport { coretweets }
    }
}

impl Accumulator for CoRetweetReportBuilder {
    type Item = Record;

    fn push(&mut self, record: &Record) {
        match record.repost_pair() {
            Some((reposter, author)) if reposter != author => self.add(reposter, author),
            _ => {}
        }
    }

    fn merge(&mut self, other: Self) {
        for (reposter, authors) in other.reposted {
            for (author, ()) in authors {
                self.add(&reposter, &author);
            }
        }
    }
}
