use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use logroller::{LogRoller, LogRollerBuilder, Rotation, RotationSize};
use thiserror::Error;

use crate::severity::SeverityBand;

/// Maximum size of a single log file before rotation, in megabytes.
pub const MAX_FILE_SIZE_MB: u64 = 128;

/// Days a rotated backup is kept before it is pruned.
pub const MAX_AGE_DAYS: u64 = 10;

#[derive(Error, Debug)]
pub enum RotationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Rotation error: {0}")]
    RollerError(#[from] logroller::LogRollerError),
}

/// Size and age rotation settings for one band's file sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_size_mb: u64,
    pub max_backups: u64,
    pub max_age_days: u64,
    pub compress: bool,
}

impl RotationPolicy {
    /// The fixed per-band table: every band rotates at the same size and
    /// age; the error band keeps more backups.
    #[must_use]
    pub const fn for_band(band: SeverityBand) -> Self {
        let max_backups = match band {
            SeverityBand::Debug | SeverityBand::Info => 3,
            SeverityBand::Error => 5,
        };
        Self {
            max_size_mb: MAX_FILE_SIZE_MB,
            max_backups,
            max_age_days: MAX_AGE_DAYS,
            compress: false,
        }
    }
}

/// Open the rotating writer for one band's log file, creating the directory
/// and pruning aged backups first. Compression stays off for every band.
pub fn open_rolling_writer(dir: &Path, band: SeverityBand) -> Result<LogRoller, RotationError> {
    let policy = RotationPolicy::for_band(band);
    fs::create_dir_all(dir)?;
    prune_aged_backups(dir, band.file_name(), policy.max_age_days)?;

    let roller = LogRollerBuilder::new(dir, Path::new(band.file_name()))
        .rotation(Rotation::SizeBased(RotationSize::MB(policy.max_size_mb)))
        .max_keep_files(policy.max_backups)
        .build()?;
    Ok(roller)
}

/// Delete rotated backups of `file_name` under `dir` whose modification time
/// is older than `max_age_days`. The live file is never touched; the rotation
/// facility itself retains by count only, so age retention happens here.
/// Individual removal failures are skipped, not fatal.
pub fn prune_aged_backups(dir: &Path, file_name: &str, max_age_days: u64) -> io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let Some(cutoff) =
        SystemTime::now().checked_sub(Duration::from_secs(max_age_days.saturating_mul(86_400)))
    else {
        return Ok(0);
    };

    // Rotated backups carry a suffix after the live name: error.log.1, ...
    let backup_prefix = format!("{file_name}.");
    let mut removed = 0_usize;
    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(backup_prefix.as_str()) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else { continue };
        let Ok(modified) = metadata.modified() else { continue };
        if modified < cutoff && fs::remove_file(entry.path()).is_ok() {
            removed = removed.saturating_add(1);
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_policy_table_sizes_and_age() {
        for band in [SeverityBand::Debug, SeverityBand::Info, SeverityBand::Error] {
            let policy = RotationPolicy::for_band(band);
            assert_eq!(policy.max_size_mb, 128);
            assert_eq!(policy.max_age_days, 10);
            assert!(!policy.compress);
        }
    }

    #[test]
    fn test_policy_table_backups() {
        assert_eq!(RotationPolicy::for_band(SeverityBand::Debug).max_backups, 3);
        assert_eq!(RotationPolicy::for_band(SeverityBand::Info).max_backups, 3);
        assert_eq!(RotationPolicy::for_band(SeverityBand::Error).max_backups, 5);
    }

    #[test]
    fn test_open_rolling_writer_creates_directory_and_file() {
        let temp_dir = tempfile::tempdir().expect("Should create temp dir");
        let dir = temp_dir.path().join("log");

        let mut roller =
            open_rolling_writer(&dir, SeverityBand::Info).expect("Should open writer");
        writeln!(roller, "one record").expect("Should write");
        roller.flush().expect("Should flush");

        let content =
            fs::read_to_string(dir.join("info.log")).expect("Log file should exist");
        assert!(content.contains("one record"));
    }

    #[test]
    fn test_prune_missing_directory_is_noop() {
        let temp_dir = tempfile::tempdir().expect("Should create temp dir");
        let removed = prune_aged_backups(&temp_dir.path().join("absent"), "info.log", 10)
            .expect("Should not error");
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_prune_removes_only_aged_backups() {
        let temp_dir = tempfile::tempdir().expect("Should create temp dir");
        let dir = temp_dir.path();
        fs::write(dir.join("error.log"), "live").expect("Should write");
        fs::write(dir.join("error.log.1"), "backup").expect("Should write");
        fs::write(dir.join("info.log.1"), "other band").expect("Should write");

        // Give the files a modification time measurably in the past
        std::thread::sleep(Duration::from_millis(50));

        // A 10-day window keeps everything
        let removed = prune_aged_backups(dir, "error.log", 10).expect("Should prune");
        assert_eq!(removed, 0);

        // A zero-day window prunes the band's backups, never the live file
        let removed = prune_aged_backups(dir, "error.log", 0).expect("Should prune");
        assert_eq!(removed, 1);
        assert!(dir.join("error.log").exists());
        assert!(!dir.join("error.log.1").exists());
        assert!(dir.join("info.log.1").exists(), "other bands' backups stay");
    }
}
