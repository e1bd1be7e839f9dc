//! Ranked aggregate reports
//!
//! Each builder is an [`Accumulator`](tweetnet_core::Accumulator) whose merge
//! reuses its own accumulation rule, so merged partials equal a single pass.
//! `finish` produces the serializable report, ranked by count descending with
//! ties kept in first-seen order.

mod coretweet;
mod mention;
mod retweet;

pub use coretweet::{AuthorPair, CoRetweetPair, CoRetweetReport, CoRetweetReportBuilder};
pub use mention::{MentionGroup, MentionReport, MentionReportBuilder, MentionedUser};
pub use retweet::{RetweetReport, RetweetReportBuilder, RetweetedTweet, RetweetedUser};

/// Stable sort, highest count first
fn rank_by<T>(entries: &mut [T], count: impl Fn(&T) -> u64) {
    entries.sort_by(|a, b| count(b).cmp(&count(a)));
}
