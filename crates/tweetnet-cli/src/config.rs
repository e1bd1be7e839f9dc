//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tweetnet_graph::filter::{DEFAULT_END_DATE, DEFAULT_START_DATE};

/// Global configuration for tweetnet
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
    pub workers: WorkersConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub directory: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("input"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// `DD-MM-YY`
    pub start_date: String,
    /// `DD-MM-YY`
    pub end_date: String,
    #[serde(deserialize_with = "deserialize_env_path")]
    pub hashtags: Option<PathBuf>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE.to_string(),
            end_date: DEFAULT_END_DATE.to_string(),
            hashtags: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WorkersConfig {
    pub default: usize,
    pub max: usize,
}

impl Default for WorkersConfig {
    fn default() -> Self {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            default: cpus.min(8),
            max: 16,
        }
    }
}

impl WorkersConfig {
    /// Requested count (or the default), clamped to `max`.
    ///
    /// Zero is passed through; the pipeline rejects it as a configuration
    /// error before any processing.
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        let workers = requested.unwrap_or(self.default);
        if workers > self.max {
            log::warn!(
                "{workers} workers requested, clamping to configured max {}",
                self.max
            );
            return self.max;
        }
        workers
    }
}

/// Deserialize a path that may be an environment variable reference like ${VAR}
fn deserialize_env_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| {
        expand_env_var(&s)
            .map(PathBuf::from)
            .map_err(serde::de::Error::custom)
    })
    .transpose()
}

/// Expand ${VAR} to environment variable value
///
/// An unset variable is an error rather than an absent path.
fn expand_env_var(s: &str) -> Result<String, String> {
    match s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        Some(var_name) => std::env::var(var_name)
            .map_err(|_| format!("environment variable {var_name} is not set")),
        None => Ok(s.to_string()),
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./tweetnet.toml (current directory)
    /// 2. ~/.config/tweetnet/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("tweetnet.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "tweetnet") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
