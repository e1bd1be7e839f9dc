//! Retweet, mention and co-retweet networks from tweet archives
//!
//! Scans directories of compressed newline-delimited tweet JSON, keeps tweets
//! inside a date window (optionally matching a hashtag allow-list), and builds
//! three graphs and three ranked reports. Work is split statically across a
//! fixed number of workers; their partial results are merged in worker order
//! and written as GEXF and JSON.

pub mod filter;
pub mod graph;
pub mod ordered;
pub mod output;
pub mod partial;
pub mod record;
pub mod report;
pub mod runner;
pub mod worker;

#[cfg(test)]
mod testutil;

pub use filter::{RecordFilter, load_hashtags, parse_date};
pub use graph::{CoRetweetGraph, EdgeKind, Graph, MentionGraph, RetweetGraph};
pub use output::{Artifact, WriteSummary, save_output, write_artifacts};
pub use partial::{Artifacts, OutputSelection, Partial, collect};
pub use record::Record;
pub use report::{
    CoRetweetReport, CoRetweetReportBuilder, MentionReport, MentionReportBuilder, RetweetReport,
    RetweetReportBuilder,
};
pub use runner::{Config, Ingested, Summary, ingest, run};
pub use worker::{WorkerStats, run_worker};
