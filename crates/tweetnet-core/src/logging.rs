//! Logging setup: env_logger backend, routed through indicatif on a TTY

use indicatif::MultiProgress;

/// Default log filter for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Debug,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (_, true) => Self::Debug,
            (true, false) => Self::Quiet,
            (false, false) => Self::Normal,
        }
    }

    fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => "info",
            Self::Debug => "debug",
        }
    }
}

/// Padded label for a log level, optionally wrapped in ANSI color.
fn level_label(level: log::Level, color: bool) -> String {
    let (label, ansi) = match level {
        log::Level::Error => ("ERROR", "\x1b[31m"),
        log::Level::Warn => ("WARN ", "\x1b[33m"),
        log::Level::Info => ("INFO ", "\x1b[32m"),
        log::Level::Debug => ("DEBUG", "\x1b[36m"),
        log::Level::Trace => ("TRACE", "\x1b[35m"),
    };
    if color {
        format!("{ansi}{label}\x1b[0m")
    } else {
        label.to_string()
    }
}

/// Logger that prints through indicatif MultiProgress so lines don't tear bars.
pub struct IndicatifLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
}

impl IndicatifLogger {
    pub fn new(inner: env_logger::Logger, multi: MultiProgress) -> Self {
        Self { inner, multi }
    }
}

impl log::Log for IndicatifLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            let line = format!("[{}] {}", level_label(record.level(), true), record.args());
            self.multi.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Initialize logging. `RUST_LOG` overrides the verbosity default.
///
/// With `multi`, logs go through the progress bars (TTY). Without, plain
/// uncolored lines for log aggregation.
pub fn init_logging(verbosity: Verbosity, multi: Option<&MultiProgress>) {
    use std::io::Write;

    let env = env_logger::Env::default().default_filter_or(verbosity.filter());

    match multi {
        Some(multi) => {
            let logger = env_logger::Builder::from_env(env).build();
            let max_level = logger.filter();
            if log::set_boxed_logger(Box::new(IndicatifLogger::new(logger, multi.clone()))).is_ok()
            {
                log::set_max_level(max_level);
            }
        }
        None => {
            let _ = env_logger::Builder::from_env(env)
                .format(|buf, record| {
                    writeln!(buf, "[{}] {}", level_label(record.level(), false), record.args())
                })
                .try_init();
        }
    }
}
