//! Tweet decoding: raw JSON line → [`Record`]

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

/// Screen name some captures use for unknown users
pub const NULL_SCREEN_NAME: &str = "null";

/// Twitter v1.1 `created_at` format, e.g. `Wed Oct 10 20:19:24 +0000 2018`
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

// === Raw structs (deserialized from JSON) ===

#[derive(Debug, Deserialize)]
struct RawTweet {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    id_str: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    user: Option<RawUser>,
    #[serde(default)]
    retweeted_status: Option<RawRetweeted>,
    #[serde(default)]
    entities: Option<RawEntities>,
}

/// Only the fields of the original tweet that identify it
#[derive(Debug, Deserialize)]
struct RawRetweeted {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    id_str: Option<String>,
    #[serde(default)]
    user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    #[serde(default)]
    screen_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEntities {
    #[serde(default)]
    user_mentions: Option<Vec<RawUser>>,
    #[serde(default)]
    hashtags: Option<Vec<RawHashtag>>,
}

#[derive(Debug, Deserialize)]
struct RawHashtag {
    #[serde(default)]
    text: Option<String>,
}

// === Record ===

/// The original post a repost points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepostOf {
    pub id: String,
    pub author: Option<String>,
}

/// One decoded post.
///
/// Screen names are `None` when missing, JSON `null`, empty, or the literal
/// `"null"`; the sentinel never survives decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub author: Option<String>,
    pub created_at: Option<NaiveDate>,
    pub repost_of: Option<RepostOf>,
    /// Distinct mentioned users, first appearance order
    pub mentioned_users: Vec<String>,
    /// Lower-cased, `#`-stripped
    pub hashtags: Vec<String>,
}

impl Record {
    pub fn from_json(line: &str) -> sonic_rs::Result<Self> {
        let raw: RawTweet = sonic_rs::from_str(line)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawTweet) -> Self {
        let entities = raw.entities.unwrap_or(RawEntities {
            user_mentions: None,
            hashtags: None,
        });

        let mut mentioned_users: Vec<String> = Vec::new();
        for mention in entities.user_mentions.unwrap_or_default() {
            if let Some(name) = screen_name(Some(mention)) {
                if !mentioned_users.contains(&name) {
                    mentioned_users.push(name);
                }
            }
        }

        let hashtags = entities
            .hashtags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|h| h.text)
            .map(|t| normalize_hashtag(&t))
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            id: tweet_id(raw.id_str, raw.id),
            author: screen_name(raw.user),
            created_at: raw.created_at.as_deref().and_then(parse_created_at),
            repost_of: raw.retweeted_status.map(|rt| RepostOf {
                id: tweet_id(rt.id_str, rt.id),
                author: screen_name(rt.user),
            }),
            mentioned_users,
            hashtags,
        }
    }

    pub fn is_repost(&self) -> bool {
        self.repost_of.is_some()
    }

    /// `(reposter, original author)` when both are known
    pub fn repost_pair(&self) -> Option<(&str, &str)> {
        let original = self.repost_of.as_ref()?.author.as_deref()?;
        Some((self.author.as_deref()?, original))
    }
}

fn screen_name(user: Option<RawUser>) -> Option<String> {
    user?
        .screen_name
        .filter(|name| !name.is_empty() && name != NULL_SCREEN_NAME)
}

fn tweet_id(id_str: Option<String>, id: Option<u64>) -> String {
    id_str
        .or_else(|| id.map(|n| n.to_string()))
        .unwrap_or_default()
}

/// Publication date of a `created_at` value; time of day is dropped.
pub fn parse_created_at(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_str(value, CREATED_AT_FORMAT)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Lower-case and strip leading `#`, the form used for allow-list matching.
pub fn normalize_hashtag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RETWEET: &str = r##"{
        "id": 1001, "id_str": "1001",
        "created_at": "Wed Oct 10 20:19:24 +0000 2018",
        "user": {"screen_name": "alice"},
        "retweeted_status": {"id": 10, "id_str": "10", "user": {"screen_name": "bob"}, "text": "hi"},
        "entities": {"hashtags": [{"text": "FooBar"}], "user_mentions": [{"screen_name": "bob"}]}
    }"##;

    #[test]
    fn decode_retweet() {
        let r = Record::from_json(RETWEET).unwrap();
        assert_eq!(r.id, "1001");
        assert_eq!(r.author.as_deref(), Some("alice"));
        assert_eq!(r.created_at, NaiveDate::from_ymd_opt(2018, 10, 10));
        assert!(r.is_repost());
        assert_eq!(
            r.repost_of,
            Some(RepostOf {
                id: "10".into(),
                author: Some("bob".into())
            })
        );
        assert_eq!(r.repost_pair(), Some(("alice", "bob")));
        assert_eq!(r.hashtags, vec!["foobar"]);
        assert_eq!(r.mentioned_users, vec!["bob"]);
    }

    #[test]
    fn decode_plain_tweet_with_mentions() {
        let line = r#"{"id": 7, "created_at": "Mon Jan 01 00:00:00 +0000 2024",
            "user": {"screen_name": "carol"},
            "entities": {"user_mentions": [{"screen_name": "dave"}, {"screen_name": "null"},
                                           {"screen_name": "dave"}, {"screen_name": "eve"}]}}"#;
        let r = Record::from_json(line).unwrap();
        assert_eq!(r.id, "7");
        assert!(!r.is_repost());
        assert_eq!(r.mentioned_users, vec!["dave", "eve"]);
        assert!(r.hashtags.is_empty());
    }

    #[test]
    fn null_sentinels_become_none() {
        let line = r#"{"id_str": "1", "user": {"screen_name": "null"},
            "retweeted_status": {"id_str": "2", "user": {"screen_name": null}}}"#;
        let r = Record::from_json(line).unwrap();
        assert_eq!(r.author, None);
        assert_eq!(r.repost_of.as_ref().unwrap().author, None);
        assert_eq!(r.repost_pair(), None);
        assert_eq!(r.created_at, None);
    }

    #[test]
    fn missing_user_and_entities() {
        let r = Record::from_json(r#"{"id": 5}"#).unwrap();
        assert_eq!(r.author, None);
        assert!(r.mentioned_users.is_empty());
        assert_eq!(r.id, "5");
    }

    #[test]
    fn null_entity_lists() {
        let line = r#"{"id": 5, "entities": {"user_mentions": null, "hashtags": null}}"#;
        let r = Record::from_json(line).unwrap();
        assert!(r.mentioned_users.is_empty());
        assert!(r.hashtags.is_empty());
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(Record::from_json("{\"id\": ").is_err());
        assert!(Record::from_json("not json").is_err());
    }

    #[test]
    fn created_at_drops_time_of_day() {
        assert_eq!(
            parse_created_at("Sun Dec 31 23:59:59 +0000 2023"),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
        assert_eq!(parse_created_at("2023-12-31"), None);
        assert_eq!(parse_created_at(""), None);
    }

    #[test]
    fn normalize_hashtag_variants() {
        assert_eq!(normalize_hashtag("#FooBar"), "foobar");
        assert_eq!(normalize_hashtag("  ##Rust \n"), "rust");
        assert_eq!(normalize_hashtag("plain"), "plain");
    }
}
