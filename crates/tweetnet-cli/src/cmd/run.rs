//! `tweetnet run` - build the selected graphs and reports

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use tweetnet_core::{SharedProgress, fmt_num};
use tweetnet_graph::{OutputSelection, RecordFilter, load_hashtags, parse_date};

use super::print_summary;
use crate::config::Config;

/// `-h` is the hashtag file here, so help is `--help` only.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Input directory, scanned recursively for *.json.bz2 / *.json.gz
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Start of the date window, inclusive (DD-MM-YY)
    #[arg(long = "start-date", visible_alias = "fi", value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,

    /// End of the date window, inclusive (DD-MM-YY)
    #[arg(long = "end-date", visible_alias = "ff", value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,

    /// Hashtag allow-list, one tag per line
    #[arg(short = 'h', long)]
    pub hashtags: Option<PathBuf>,

    /// Write the retweet graph (rtp.gexf)
    #[arg(long)]
    pub grt: bool,

    /// Write the retweet report (rtp.json)
    #[arg(long)]
    pub jrt: bool,

    /// Write the mention graph (mentionp.gexf)
    #[arg(long)]
    pub gm: bool,

    /// Write the mention report (mentionp.json)
    #[arg(long)]
    pub jm: bool,

    /// Write the co-retweet graph (corrtwp.gexf)
    #[arg(long)]
    pub gcrt: bool,

    /// Write the co-retweet report (corrtwp.json)
    #[arg(long)]
    pub jcrt: bool,

    /// Number of parallel workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,
}

impl RunArgs {
    pub fn selection(&self) -> OutputSelection {
        OutputSelection {
            retweet_graph: self.grt,
            retweet_report: self.jrt,
            mention_graph: self.gm,
            mention_report: self.jm,
            coretweet_graph: self.gcrt,
            coretweet_report: self.jcrt,
        }
    }
}

/// Merge CLI flags over the config file into a pipeline config.
pub fn resolve(args: &RunArgs, config: &Config) -> Result<tweetnet_graph::Config> {
    let start = match args.start_date {
        Some(date) => date,
        None => parse_date(&config.filter.start_date).context("[filter] start_date")?,
    };
    let end = match args.end_date {
        Some(date) => date,
        None => parse_date(&config.filter.end_date).context("[filter] end_date")?,
    };

    let hashtags = match args.hashtags.as_ref().or(config.filter.hashtags.as_ref()) {
        Some(path) => load_hashtags(path)?,
        None => Default::default(),
    };

    Ok(tweetnet_graph::Config {
        input_dir: args
            .directory
            .clone()
            .unwrap_or_else(|| config.input.directory.clone()),
        output_dir: args
            .output
            .clone()
            .unwrap_or_else(|| config.output.directory.clone()),
        workers: config.workers.resolve(args.workers),
        filter: RecordFilter::new(start, end, hashtags),
        selection: args.selection(),
    })
}

pub fn run(args: RunArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let run_config = resolve(&args, config)?;

    log::info!("Input: {}", run_config.input_dir.display());
    log::info!("Output: {}", run_config.output_dir.display());
    log::info!(
        "Window: {} to {}",
        run_config.filter.start(),
        run_config.filter.end()
    );
    log::info!(
        "Outputs: {} of 6 selected",
        run_config.selection.count()
    );

    let summary = tweetnet_graph::run(&run_config, progress)?;

    print_summary(
        "tweetnet",
        &[
            (
                "Archives",
                format!("{} across {} workers", summary.files, summary.workers),
            ),
            (
                "Records",
                format!(
                    "{} from {} lines ({} malformed)",
                    fmt_num(summary.lines.records_kept),
                    fmt_num(summary.lines.lines_scanned),
                    fmt_num(summary.lines.malformed)
                ),
            ),
            (
                "Outputs",
                format!("{} written, {} skipped", summary.written, summary.skipped),
            ),
            ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
        ],
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_come_from_config() {
        let mut config = Config::default();
        config.workers.default = 3;
        let resolved = resolve(&RunArgs::default(), &config).unwrap();

        assert_eq!(resolved.input_dir, PathBuf::from("input"));
        assert_eq!(resolved.output_dir, PathBuf::from("."));
        assert_eq!(resolved.workers, 3);
        assert_eq!(resolved.filter.start(), date(2000, 1, 1));
        assert_eq!(resolved.filter.end(), date(2024, 1, 1));
        assert!(resolved.filter.hashtags().is_empty());
        assert!(resolved.selection.is_empty());
    }

    #[test]
    fn flags_override_config() {
        let dir = TempDir::new().unwrap();
        let tags = dir.path().join("tags.txt");
        std::fs::write(&tags, "#Rust\nserde\n").unwrap();

        let args = RunArgs {
            directory: Some(PathBuf::from("tweets")),
            start_date: Some(date(2021, 2, 1)),
            hashtags: Some(tags),
            jrt: true,
            gcrt: true,
            workers: Some(2),
            ..Default::default()
        };
        let resolved = resolve(&args, &Config::default()).unwrap();

        assert_eq!(resolved.input_dir, PathBuf::from("tweets"));
        assert_eq!(resolved.workers, 2);
        assert_eq!(resolved.filter.start(), date(2021, 2, 1));
        assert_eq!(resolved.filter.end(), date(2024, 1, 1));
        assert_eq!(resolved.filter.hashtags().len(), 2);
        assert!(resolved.filter.hashtags().contains("rust"));
        assert!(resolved.selection.retweet_report);
        assert!(resolved.selection.coretweet_graph);
        assert_eq!(resolved.selection.count(), 2);
    }

    #[test]
    fn bad_config_date_is_an_error() {
        let mut config = Config::default();
        config.filter.end_date = "2024-01-01".to_string();
        let err = resolve(&RunArgs::default(), &config).unwrap_err();
        assert!(format!("{err:#}").contains("end_date"));
    }

    #[test]
    fn missing_hashtag_file_is_an_error() {
        let args = RunArgs {
            hashtags: Some(PathBuf::from("/nonexistent/tweetnet/tags.txt")),
            ..Default::default()
        };
        assert!(resolve(&args, &Config::default()).is_err());
    }
}
