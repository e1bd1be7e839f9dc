//! Accumulator trait and generic line processor for decompressed archives

use std::io::BufRead;
use std::sync::atomic::Ordering;

use indicatif::ProgressBar;

use crate::progress::fmt_num;
use crate::stream::ByteCounter;

/// In-memory fold over the records a worker accepts.
///
/// Each worker owns its accumulators exclusively. After all workers finish,
/// their accumulators are combined with [`merge`](Accumulator::merge) in worker
/// order, which must give the same result as pushing every record into one
/// accumulator.
pub trait Accumulator {
    type Item;

    /// Fold one accepted record into the accumulator
    fn push(&mut self, item: &Self::Item);

    /// Absorb another accumulator of the same kind
    fn merge(&mut self, other: Self)
    where
        Self: Sized;
}

/// Outcome of decoding and filtering a single line
#[derive(Debug)]
pub enum Line<T> {
    /// Decoded and accepted by the filter
    Keep(T),
    /// Decoded but rejected, or blank
    Skip,
    /// Not a decodable record
    Malformed,
}

/// Statistics from processing archive lines
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineStats {
    pub lines_scanned: usize,
    pub records_kept: usize,
    pub malformed: usize,
}

impl LineStats {
    pub fn add(&mut self, other: LineStats) {
        self.lines_scanned += other.lines_scanned;
        self.records_kept += other.records_kept;
        self.malformed += other.malformed;
    }
}

/// Initial capacity for per-line read buffer
const LINE_BUF_CAPACITY: usize = 4096;

/// Progress update interval (every N lines to avoid overhead)
const UPDATE_INTERVAL: usize = 10_000;

/// Read lines, decode+filter each, push kept records into the accumulator.
///
/// Lines that are not valid UTF-8 count as malformed instead of failing the
/// read. Only errors from the underlying reader are returned.
pub fn process_lines<A: Accumulator>(
    reader: &mut impl BufRead,
    counter: &ByteCounter,
    acc: &mut A,
    mut parse_filter: impl FnMut(&str) -> Line<A::Item>,
    pb: &ProgressBar,
) -> std::io::Result<LineStats> {
    let mut buf = Vec::with_capacity(LINE_BUF_CAPACITY);
    let mut stats = LineStats::default();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines_scanned += 1;

        if stats.lines_scanned % UPDATE_INTERVAL == 0 {
            pb.set_position(counter.load(Ordering::Relaxed));
            pb.set_message(format!(
                "{} kept / {} lines",
                fmt_num(stats.records_kept),
                fmt_num(stats.lines_scanned)
            ));
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            stats.malformed += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_filter(line) {
            Line::Keep(item) => {
                acc.push(&item);
                stats.records_kept += 1;
            }
            Line::Skip => {}
            Line::Malformed => stats.malformed += 1,
        }
    }
    pb.set_position(counter.load(Ordering::Relaxed));
    Ok(stats)
}
