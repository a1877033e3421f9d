use tracing::Level;

use crate::config::LogPriority;

/// A contiguous range of log levels treated as one filtering unit. Each band
/// owns its own sink; bands are never merged at the filter level even when
/// they share a physical destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityBand {
    Debug,
    Info,
    Error,
}

/// Numeric severity rank; higher means more severe. TRACE sits below the
/// lowest band and is never emitted.
fn rank(level: &Level) -> i8 {
    if *level == Level::ERROR {
        2
    } else if *level == Level::WARN {
        1
    } else if *level == Level::INFO {
        0
    } else if *level == Level::DEBUG {
        -1
    } else {
        -2
    }
}

impl SeverityBand {
    /// The band's half-open `[low, high)` rank range.
    #[must_use]
    pub const fn bounds(self) -> (i8, i8) {
        match self {
            Self::Debug => (-1, 0),
            Self::Info => (0, 2),
            Self::Error => (2, i8::MAX),
        }
    }

    /// Whether a record at `level` belongs to this band.
    #[must_use]
    pub fn contains(self, level: &Level) -> bool {
        let (low, high) = self.bounds();
        let r = rank(level);
        r >= low && r < high
    }

    /// The log file this band writes when file sinks are active.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Debug => "debug.log",
            Self::Info => "info.log",
            Self::Error => "error.log",
        }
    }
}

/// The bands active under a minimum priority, in severity order. The error
/// band is active under every priority.
#[must_use]
pub fn active_bands(priority: LogPriority) -> &'static [SeverityBand] {
    match priority {
        LogPriority::Debug => &[SeverityBand::Debug, SeverityBand::Info, SeverityBand::Error],
        LogPriority::Info => &[SeverityBand::Info, SeverityBand::Error],
        LogPriority::Error => &[SeverityBand::Error],
    }
}
