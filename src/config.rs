use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Default directory for file sinks, relative to the process working directory.
pub const DEFAULT_LOG_DIR: &str = "./log";

/// Output encoding for log records. Both encodings carry the same fields
/// (timestamp, level, caller, message); only serialization differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output with ANSI-colorized level labels.
    #[default]
    Normal,
    /// Line-delimited JSON.
    Json,
}

/// Sink topology for log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDestination {
    /// Standard output only.
    #[default]
    Console,
    /// Standard output plus one rotating file per severity band.
    File,
}

/// The lowest severity band the logger emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogPriority {
    Debug,
    #[default]
    Info,
    Error,
}

/// Parse an output format from a string. Unrecognized values fall back to
/// the default rather than erroring.
#[must_use]
pub fn parse_format(s: &str) -> LogFormat {
    match s.to_lowercase().as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Normal,
    }
}

/// Parse a destination from a string. Unrecognized values fall back to the
/// default rather than erroring.
#[must_use]
pub fn parse_destination(s: &str) -> LogDestination {
    match s.to_lowercase().as_str() {
        "file" => LogDestination::File,
        _ => LogDestination::Console,
    }
}

/// Parse a minimum priority from a string. Unrecognized values fall back to
/// the default rather than erroring.
#[must_use]
pub fn parse_priority(s: &str) -> LogPriority {
    match s.to_lowercase().as_str() {
        "debug" => LogPriority::Debug,
        "error" => LogPriority::Error,
        _ => LogPriority::Info,
    }
}

impl<'de> Deserialize<'de> for LogFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(parse_format(&value))
    }
}

impl<'de> Deserialize<'de> for LogDestination {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(parse_destination(&value))
    }
}

impl<'de> Deserialize<'de> for LogPriority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(parse_priority(&value))
    }
}

/// Configuration for the logging system. Every field is optional; an unset
/// field means "use the default" and is never rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Output encoding. Defaults to human-readable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<LogFormat>,
    /// Sink topology. Defaults to console-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<LogDestination>,
    /// Lowest severity band to emit. Defaults to info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_priority: Option<LogPriority>,
    /// Directory for file sinks. Defaults to `./log`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

/// A configuration with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub format: LogFormat,
    pub destination: LogDestination,
    pub minimum_priority: LogPriority,
    pub log_dir: PathBuf,
}

impl LoggerConfig {
    /// Substitute the default for every unset field. Pure; performed once at
    /// construction time.
    #[must_use]
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            format: self.format.unwrap_or_default(),
            destination: self.destination.unwrap_or_default(),
            minimum_priority: self.minimum_priority.unwrap_or_default(),
            log_dir: self
                .log_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }
}

/// Read a logger configuration file (JSON). A missing file is not an error.
pub fn load_config(path: &Path) -> Result<Option<LoggerConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config: LoggerConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}
