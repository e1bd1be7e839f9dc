//! One worker's pass over its chunk of archives

use std::path::PathBuf;
use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use tweetnet_core::{IngestError, Line, LineStats, open_archive, process_lines, start_archive};

use crate::filter::RecordFilter;
use crate::partial::{OutputSelection, Partial};
use crate::record::Record;

/// Statistics from one worker's pass
#[derive(Debug, Clone, Default)]
pub struct WorkerStats {
    pub rank: usize,
    pub files: usize,
    pub lines: LineStats,
    pub elapsed: Duration,
}

impl WorkerStats {
    /// Log stats for non-TTY output
    pub fn log(&self) {
        log::info!(
            "worker_{:02}: {} records from {} lines in {} files ({} malformed) in {:.1}s",
            self.rank,
            self.lines.records_kept,
            self.lines.lines_scanned,
            self.files,
            self.lines.malformed,
            self.elapsed.as_secs_f64()
        );
    }
}

/// Decode, filter and accumulate every line of `files`, in order.
///
/// Malformed lines are counted and skipped. Any file that cannot be opened or
/// read fails the whole worker.
pub fn run_worker(
    rank: usize,
    files: &[PathBuf],
    filter: &RecordFilter,
    selection: OutputSelection,
    pb: &ProgressBar,
) -> Result<(Partial, WorkerStats), IngestError> {
    let start = Instant::now();
    let mut partial = Partial::new(selection);
    let mut lines = LineStats::default();

    for path in files {
        let (mut reader, counter, total) = open_archive(path)?;
        start_archive(pb, path, total);
        log::debug!("worker_{rank:02}: reading {}", path.display());

        let file_stats = process_lines(&mut reader, &counter, &mut partial, parse_line(filter), pb)
            .map_err(|e| IngestError::io(path, e))?;
        log::debug!(
            "worker_{rank:02}: {} kept of {} lines in {}",
            file_stats.records_kept,
            file_stats.lines_scanned,
            path.display()
        );
        lines.add(file_stats);
    }

    pb.finish_and_clear();
    Ok((
        partial,
        WorkerStats {
            rank,
            files: files.len(),
            lines,
            elapsed: start.elapsed(),
        },
    ))
}

/// Per-line decode and filter step
fn parse_line(filter: &RecordFilter) -> impl FnMut(&str) -> Line<Record> + '_ {
    move |line| match Record::from_json(line) {
        Ok(record) if filter.is_valid(&record) => Line::Keep(record),
        Ok(_) => Line::Skip,
        Err(_) => Line::Malformed,
    }
}
