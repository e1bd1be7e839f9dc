//! Record constructors for unit tests

use chrono::NaiveDate;

use crate::record::{Record, RepostOf};

fn base(author: &str, id: &str) -> Record {
    Record {
        id: id.to_string(),
        author: Some(author.to_string()),
        created_at: NaiveDate::from_ymd_opt(2023, 6, 1),
        repost_of: None,
        mentioned_users: Vec::new(),
        hashtags: Vec::new(),
    }
}

/// Original post by `author` mentioning `mentions`
pub fn post(author: &str, id: &str, mentions: &[&str]) -> Record {
    let mut r = base(author, id);
    r.mentioned_users = mentions.iter().map(|m| m.to_string()).collect();
    r
}

/// `reposter` retweets tweet `original_id` written by `original_author`
pub fn repost(reposter: &str, original_author: &str, original_id: &str) -> Record {
    let mut r = base(reposter, &format!("rt-{reposter}-{original_id}"));
    r.repost_of = Some(RepostOf {
        id: original_id.to_string(),
        author: Some(original_author.to_string()),
    });
    r
}
