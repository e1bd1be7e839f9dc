//! Record validation: publication date window and hashtag allow-list

use std::path::Path;

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use tweetnet_core::IngestError;

use crate::record::{Record, normalize_hashtag};

/// Date format accepted on the command line and in config (`DD-MM-YY`)
pub const DATE_FORMAT: &str = "%d-%m-%y";

/// Window used when no start date is given
pub const DEFAULT_START_DATE: &str = "01-01-00";

/// Window used when no end date is given
pub const DEFAULT_END_DATE: &str = "01-01-24";

pub fn parse_date(value: &str) -> Result<NaiveDate, IngestError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| IngestError::config(format!("bad date {value:?} (expected DD-MM-YY): {e}")))
}

/// Load a hashtag allow-list: one tag per line, case-insensitive, `#` optional.
pub fn load_hashtags(path: &Path) -> Result<FxHashSet<String>, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let tags: FxHashSet<String> = content
        .lines()
        .map(normalize_hashtag)
        .filter(|t| !t.is_empty())
        .collect();
    log::info!("Loaded {} hashtags from {}", tags.len(), path.display());
    Ok(tags)
}

/// Accepts records published inside `[start, end]` (inclusive, date only)
/// that carry at least one allowed hashtag. An empty allow-list disables the
/// hashtag check.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    start: NaiveDate,
    end: NaiveDate,
    hashtags: FxHashSet<String>,
}

impl RecordFilter {
    pub fn new(start: NaiveDate, end: NaiveDate, hashtags: FxHashSet<String>) -> Self {
        if start > end {
            log::warn!("Start date {start} is after end date {end}; no record can match");
        }
        let hashtags = hashtags.iter().map(|t| normalize_hashtag(t)).collect();
        Self {
            start,
            end,
            hashtags,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn hashtags(&self) -> &FxHashSet<String> {
        &self.hashtags
    }

    pub fn is_valid(&self, record: &Record) -> bool {
        let Some(published) = record.created_at else {
            return false;
        };
        if published < self.start || published > self.end {
            return false;
        }
        self.hashtags.is_empty() || record.hashtags.iter().any(|t| self.hashtags.contains(t))
    }
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            hashtags: FxHashSet::default(),
        }
    }
}
