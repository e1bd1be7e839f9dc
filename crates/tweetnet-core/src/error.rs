//! Common error type for archive ingestion

use std::path::{Path, PathBuf};

/// Error that aborts an ingestion run.
///
/// Per-line decode failures never surface here; they are counted and skipped.
/// Anything that reaches this type is fatal for the whole run.
#[derive(Debug)]
pub enum IngestError {
    /// An input or output file could not be opened, read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid run configuration, detected before any file is read.
    Config(String),
}

impl IngestError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Config(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Config(_) => None,
        }
    }
}
