mod init;

pub use init::{build_logger, init_logging, BuildError, Logger, ProcessingCore};

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global log directory, set once when a logger with file sinks is installed.
static LOG_DIR_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Record the active log directory for later retrieval (e.g., in structured
/// error reports).
pub fn set_log_dir_path(path: PathBuf) {
    let _unused = LOG_DIR_PATH.set(path);
}

/// The log directory recorded at install time, when file sinks are active.
#[must_use]
pub fn log_dir_path() -> Option<&'static Path> {
    LOG_DIR_PATH.get().map(PathBuf::as_path)
}

#[cfg(test)]
#[path = "../logging_tests.rs"]
mod logging_tests;
