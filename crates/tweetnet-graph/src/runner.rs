//! Pipeline orchestration: discover, partition, scatter, gather, write

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use rayon::prelude::*;
use tweetnet_core::{IngestError, LineStats, ProgressContext, discover_archives, partition};

use crate::filter::RecordFilter;
use crate::output::write_artifacts;
use crate::partial::{Artifacts, OutputSelection, collect};
use crate::worker::{WorkerStats, run_worker};

/// Everything a run needs, already resolved from CLI and config file
#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub workers: usize,
    pub filter: RecordFilter,
    pub selection: OutputSelection,
}

/// Merged artifacts plus per-worker statistics, before anything is written
#[derive(Debug)]
pub struct Ingested {
    pub artifacts: Artifacts,
    pub files: usize,
    pub workers: Vec<WorkerStats>,
}

/// Discover archives, process them on `config.workers` threads and merge.
///
/// Fails before any processing on configuration errors (zero workers, missing
/// input directory). The first worker error aborts the run.
pub fn ingest(config: &Config, progress: &ProgressContext) -> anyhow::Result<Ingested> {
    let files = discover_archives(&config.input_dir)?;
    if files.is_empty() {
        log::warn!("No archives found under {}", config.input_dir.display());
    }
    let chunks = partition(&files, config.workers)?;

    log::info!(
        "Processing {} archives with {} workers",
        files.len(),
        config.workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("worker_{i:02}"))
        .build()
        .context("failed to build worker pool")?;

    let bars: Vec<_> = chunks
        .iter()
        .enumerate()
        .map(|(rank, chunk)| progress.worker_bar(rank, chunk.len()))
        .collect();

    // Indexed collect keeps results in rank order
    let results = pool.install(|| {
        chunks
            .par_iter()
            .zip(bars.par_iter())
            .enumerate()
            .map(|(rank, (chunk, pb))| {
                run_worker(rank, chunk, &config.filter, config.selection, pb)
            })
            .collect::<Result<Vec<_>, IngestError>>()
    })?;

    let stage = progress.stage_line("collect");
    stage.set_message(format!("merging {} partials", results.len()));

    let mut workers = Vec::with_capacity(results.len());
    let mut partials = Vec::with_capacity(results.len());
    for (partial, stats) in results {
        if !progress.is_tty() {
            stats.log();
        }
        workers.push(stats);
        partials.push(partial);
    }
    let artifacts = collect(config.selection, partials).finish();
    stage.finish_and_clear();

    Ok(Ingested {
        artifacts,
        files: files.len(),
        workers,
    })
}

/// Full run: ingest, write every selected artifact, log a summary.
pub fn run(config: &Config, progress: &ProgressContext) -> anyhow::Result<Summary> {
    let start = Instant::now();

    if config.selection.is_empty() {
        log::warn!("No outputs selected; records will be scanned but nothing written");
    }

    let ingested = ingest(config, progress)?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let stage = progress.stage_line("write");
    stage.set_message(format!("writing to {}", config.output_dir.display()));
    let written = write_artifacts(&ingested.artifacts, &config.output_dir);
    stage.finish_and_clear();

    let mut lines = LineStats::default();
    for w in &ingested.workers {
        lines.add(w.lines);
    }

    let summary = Summary {
        files: ingested.files,
        workers: ingested.workers.len(),
        lines,
        written: written.written,
        skipped: written.skipped,
        elapsed: start.elapsed(),
    };
    summary.log();
    Ok(summary)
}

/// Summary of a pipeline run
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub files: usize,
    pub workers: usize,
    pub lines: LineStats,
    pub written: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

impl Summary {
    pub fn log(&self) {
        log::info!("=== Pipeline Summary ===");
        log::info!("Archives: {} across {} workers", self.files, self.workers);
        log::info!(
            "Records: {} from {} lines ({} malformed)",
            self.lines.records_kept,
            self.lines.lines_scanned,
            self.lines.malformed
        );
        if self.skipped > 0 {
            log::warn!(
                "Outputs: {} written, {} skipped",
                self.written,
                self.skipped
            );
        } else {
            log::info!("Outputs: {} written", self.written);
        }
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
        let secs = self.elapsed.as_secs_f64();
        if self.lines.lines_scanned > 0 && secs > 0.0 {
            log::info!(
                "Throughput: {:.0} lines/sec",
                self.lines.lines_scanned as f64 / secs
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(input: PathBuf, output: PathBuf, workers: usize) -> Config {
        Config {
            input_dir: input,
            output_dir: output,
            workers,
            filter: RecordFilter::default(),
            selection: OutputSelection::all(),
        }
    }

    #[test]
    fn zero_workers_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let cfg = config(dir.path().to_path_buf(), dir.path().join("out"), 0);
        let err = ingest(&cfg, &ProgressContext::hidden()).unwrap_err();
        let err = err.downcast_ref::<IngestError>().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn missing_input_dir_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let cfg = config(dir.path().join("nope"), dir.path().join("out"), 2);
        let err = ingest(&cfg, &ProgressContext::hidden()).unwrap_err();
        assert!(err.downcast_ref::<IngestError>().unwrap().is_config());
    }

    #[test]
    fn empty_input_writes_empty_outputs() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        let cfg = config(input, dir.path().join("out"), 3);

        let summary = run(&cfg, &ProgressContext::hidden()).unwrap();
        assert_eq!(summary.files, 0);
        assert_eq!(summary.workers, 3);
        assert_eq!(summary.written, 6);
        assert_eq!(summary.skipped, 0);
        assert!(dir.path().join("out/rtp.json").exists());
    }

    #[test]
    fn summary_log_does_not_panic() {
        Summary::default().log();
    }
}
