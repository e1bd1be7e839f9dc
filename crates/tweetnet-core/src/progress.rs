//! Progress reporting for TTY and non-TTY environments.
//!
//! TTY mode: one indicatif bar per worker, tracking compressed bytes of the
//! archive currently being read. Non-TTY mode: hidden bars, logs only.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Per-worker bar over compressed bytes
fn bytes_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix:<10.dim} {bar:30.green/dim} {binary_bytes:>7}/{binary_total_bytes:7} {wide_msg:.dim}")
        .expect("invalid template")
        .progress_chars("--")
}

/// Idle worker line (empty partition or between archives)
fn idle_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix:<10.dim} {wide_msg:.dim}")
        .expect("invalid template")
}

/// Point a worker bar at a new archive of `total` compressed bytes.
pub fn start_archive(pb: &ProgressBar, path: &Path, total: u64) {
    pb.set_style(bytes_style());
    pb.set_length(total);
    pb.set_position(0);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    pb.set_message(name);
}

/// Central progress context managing multi-progress bars.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create new context, detecting TTY automatically.
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty: std::io::stderr().is_terminal(),
        }
    }

    /// Context that never draws, for tests and embedding.
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty: false,
        }
    }

    /// Create the bar for worker `rank`.
    ///
    /// TTY: visible idle line until [`start_archive`] is called.
    /// Non-TTY: hidden (no-op).
    pub fn worker_bar(&self, rank: usize, files: usize) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new(0));
        pb.set_style(idle_style());
        pb.set_prefix(format!("worker_{rank:02}"));
        pb.set_message(format!("{files} archives queued"));
        pb
    }

    /// Create a stage status line with a spinner.
    ///
    /// Update with `pb.set_message(...)`, stop with `pb.finish()`.
    pub fn stage_line(&self, name: &str) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new(0));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {prefix:<10.cyan.bold} {wide_msg}")
                .expect("invalid template"),
        );
        pb.set_prefix(name.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Get reference to `MultiProgress` for log bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper for `ProgressContext`.
pub type SharedProgress = Arc<ProgressContext>;

/// Format number with thousand separators.
pub fn fmt_num(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_small() {
        assert_eq!(fmt_num(0), "0");
        assert_eq!(fmt_num(7), "7");
        assert_eq!(fmt_num(999), "999");
    }

    #[test]
    fn fmt_num_thousands() {
        assert_eq!(fmt_num(1_000), "1,000");
        assert_eq!(fmt_num(12_345), "12,345");
        assert_eq!(fmt_num(123_456), "123,456");
        assert_eq!(fmt_num(1_234_567_890), "1,234,567,890");
    }

    #[test]
    fn hidden_context_hands_out_hidden_bars() {
        let ctx = ProgressContext::hidden();
        assert!(!ctx.is_tty());
        assert!(ctx.worker_bar(0, 3).is_hidden());
        assert!(ctx.stage_line("merge").is_hidden());
    }

    #[test]
    fn start_archive_on_hidden_bar_does_not_panic() {
        let pb = ProgressBar::hidden();
        start_archive(&pb, Path::new("input/00.json.bz2"), 1024);
        assert_eq!(pb.length(), Some(1024));
    }
}
