//! tweetnet - retweet, mention and co-retweet networks from tweet archives
//!
//! Reads compressed tweet dumps and writes interaction graphs (GEXF) and
//! ranked reports (JSON).

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "tweetnet")]
#[command(about = "Interaction networks from tweet archives")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./tweetnet.toml or ~/.config/tweetnet/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build graphs and reports from an archive directory
    #[command(disable_help_flag = true)]
    Run(cmd::run::RunArgs),
    /// Show how archives would be split across workers
    Plan(cmd::plan::PlanArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = Arc::new(tweetnet_core::ProgressContext::new());

    // TTY: warn unless --debug, the bars show activity.
    // Non-TTY: info unless --debug, logs are the only progress indicator.
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = is_tty && !cli.debug;
    tweetnet_core::init_logging(
        tweetnet_core::Verbosity::from_flags(quiet, cli.debug),
        multi,
    );

    let config = match cli.config {
        Some(path) => Config::from_file(&path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Run(args) => cmd::run::run(args, &config, &progress),
        Command::Plan(args) => cmd::plan::run(args, &config),
        Command::Config => {
            cmd::print_summary(
                "Setting",
                &[
                    (
                        "Input directory",
                        config.input.directory.display().to_string(),
                    ),
                    (
                        "Output directory",
                        config.output.directory.display().to_string(),
                    ),
                    ("Start date", config.filter.start_date.clone()),
                    ("End date", config.filter.end_date.clone()),
                    (
                        "Hashtags",
                        config
                            .filter
                            .hashtags
                            .as_ref()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "not set".to_string()),
                    ),
                    (
                        "Workers",
                        format!("{} (max: {})", config.workers.default, config.workers.max),
                    ),
                ],
            );
            Ok(())
        }
    }
}
