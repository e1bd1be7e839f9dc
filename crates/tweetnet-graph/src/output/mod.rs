//! Writing merged artifacts to disk
//!
//! Graphs go out as GEXF, reports as pretty JSON. The format is picked from
//! the destination's extension; a kind/format pair that has no writer is
//! logged and skipped rather than failing the run.

mod gexf;
mod json;

pub use gexf::write_gexf;
pub use json::write_json;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;

use crate::graph::Graph;
use crate::partial::Artifacts;
use crate::report::{CoRetweetReport, MentionReport, RetweetReport};

pub const RETWEET_STEM: &str = "rtp";
pub const MENTION_STEM: &str = "mentionp";
pub const CORETWEET_STEM: &str = "corrtwp";

/// Something that can be saved
#[derive(Debug, Clone, Copy)]
pub enum Artifact<'a> {
    Graph(&'a Graph),
    Retweets(&'a RetweetReport),
    Mentions(&'a MentionReport),
    CoRetweets(&'a CoRetweetReport),
}

impl Artifact<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Artifact::Graph(_) => "graph",
            Artifact::Retweets(_) => "retweet report",
            Artifact::Mentions(_) => "mention report",
            Artifact::CoRetweets(_) => "co-retweet report",
        }
    }
}

/// On-disk format, from the destination's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Gexf,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "gexf" => Some(Format::Gexf),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Write one artifact to `path`.
///
/// Returns `Ok(false)` without touching the filesystem when the artifact has
/// no writer for the destination's format.
pub fn save_output(artifact: Artifact<'_>, path: &Path) -> anyhow::Result<bool> {
    let format = Format::from_path(path);
    let supported = matches!(
        (artifact, format),
        (Artifact::Graph(_), Some(Format::Gexf))
            | (Artifact::Retweets(_), Some(Format::Json))
            | (Artifact::Mentions(_), Some(Format::Json))
            | (Artifact::CoRetweets(_), Some(Format::Json))
    );
    if !supported {
        log::error!(
            "cannot save {} to {}: unsupported format",
            artifact.kind(),
            path.display()
        );
        return Ok(false);
    }

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let out = BufWriter::new(file);
    match artifact {
        Artifact::Graph(g) => write_gexf(g, out),
        Artifact::Retweets(r) => write_json(r, out),
        Artifact::Mentions(r) => write_json(r, out),
        Artifact::CoRetweets(r) => write_json(r, out),
    }
    .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!("Wrote {} to {}", artifact.kind(), path.display());
    Ok(true)
}

/// Outcome of writing a run's artifacts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Write every present artifact into `dir` under its fixed file name.
///
/// A failed or unsupported write is logged and counted as skipped; the
/// remaining artifacts are still written.
pub fn write_artifacts(artifacts: &Artifacts, dir: &Path) -> WriteSummary {
    let planned: [(Option<Artifact<'_>>, String); 6] = [
        (
            artifacts.retweet_graph.as_ref().map(Artifact::Graph),
            format!("{RETWEET_STEM}.gexf"),
        ),
        (
            artifacts.retweet_report.as_ref().map(Artifact::Retweets),
            format!("{RETWEET_STEM}.json"),
        ),
        (
            artifacts.mention_graph.as_ref().map(Artifact::Graph),
            format!("{MENTION_STEM}.gexf"),
        ),
        (
            artifacts.mention_report.as_ref().map(Artifact::Mentions),
            format!("{MENTION_STEM}.json"),
        ),
        (
            artifacts.coretweet_graph.as_ref().map(Artifact::Graph),
            format!("{CORETWEET_STEM}.gexf"),
        ),
        (
            artifacts.coretweet_report.as_ref().map(Artifact::CoRetweets),
            format!("{CORETWEET_STEM}.json"),
        ),
    ];

    let mut summary = WriteSummary::default();
    for (artifact, name) in planned {
        let Some(artifact) = artifact else { continue };
        match save_output(artifact, &dir.join(&name)) {
            Ok(true) => summary.written += 1,
            Ok(false) => summary.skipped += 1,
            Err(e) => {
                log::error!("{e:#}");
                summary.skipped += 1;
            }
        }
    }
    summary
}
