use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The physical destination a processing core writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTopology {
    /// Standard output only.
    Console,
    /// Standard output plus a rotating file at the given path.
    ConsoleAndFile(PathBuf),
}

impl SinkTopology {
    /// Path of the file sink, when one exists.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::Console => None,
            Self::ConsoleAndFile(path) => Some(path.as_path()),
        }
    }
}

/// A writer that duplicates every buffer to an ordered sequence of owned
/// sinks. Wrapped in a `Mutex` it serves as a fmt layer's `MakeWriter`.
pub struct FanoutWriter {
    sinks: Vec<Box<dyn Write + Send>>,
}

impl FanoutWriter {
    #[must_use]
    pub fn new(sinks: Vec<Box<dyn Write + Send>>) -> Self {
        Self { sinks }
    }

    /// Number of attached sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Write for FanoutWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Every sink sees the whole record immediately; file sinks must not
        // hold partial records across a rotation boundary.
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
            sink.flush()?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
