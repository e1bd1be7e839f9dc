//! `tweetnet plan` - show how archives would be split across workers

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use comfy_table::{
    Cell, CellAlignment, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};

use tweetnet_core::{discover_archives, partition};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Input directory, scanned recursively for *.json.bz2 / *.json.gz
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short, long)]
    pub workers: Option<usize>,
}

/// One worker's share of the input
#[derive(Debug, PartialEq, Eq)]
struct WorkerPlan {
    rank: usize,
    files: usize,
    bytes: u64,
    first: Option<String>,
    last: Option<String>,
}

fn plan(files: &[PathBuf], workers: usize, base: &Path) -> Result<Vec<WorkerPlan>> {
    let display = |p: &PathBuf| {
        p.strip_prefix(base)
            .unwrap_or(p)
            .display()
            .to_string()
    };
    let chunks = partition(files, workers)?;
    Ok(chunks
        .iter()
        .enumerate()
        .map(|(rank, chunk)| WorkerPlan {
            rank,
            files: chunk.len(),
            bytes: chunk
                .iter()
                .filter_map(|p| std::fs::metadata(p).ok())
                .map(|m| m.len())
                .sum(),
            first: chunk.first().map(display),
            last: chunk.last().map(display),
        })
        .collect())
}

/// Binary size with one decimal, e.g. `1.5 MiB`
fn fmt_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn run(args: PlanArgs, config: &Config) -> Result<()> {
    let dir = args
        .directory
        .unwrap_or_else(|| config.input.directory.clone());
    let workers = config.workers.resolve(args.workers);

    let files = discover_archives(&dir)?;
    let plans = plan(&files, workers, &dir)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Worker").fg(Color::Cyan),
            Cell::new("Archives").fg(Color::Cyan),
            Cell::new("Size").fg(Color::Cyan),
            Cell::new("First").fg(Color::Cyan),
            Cell::new("Last").fg(Color::Cyan),
        ]);
    for p in &plans {
        table.add_row(vec![
            Cell::new(format!("worker_{:02}", p.rank)),
            Cell::new(p.files).set_alignment(CellAlignment::Right),
            Cell::new(fmt_bytes(p.bytes)).set_alignment(CellAlignment::Right),
            Cell::new(p.first.as_deref().unwrap_or("-")),
            Cell::new(p.last.as_deref().unwrap_or("-")),
        ]);
    }

    eprintln!(
        "\n{} archives under {} across {} workers",
        files.len(),
        dir.display(),
        workers
    );
    eprintln!("{table}");
    Ok(())
}
