use color_eyre::eyre::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::dispatcher::SetGlobalDefaultError;
use tracing::Dispatch;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    registry::Registry,
    EnvFilter, Layer,
};

use super::set_log_dir_path;
use crate::config::{LogDestination, LogFormat, LoggerConfig, ResolvedConfig};
use crate::rotation::{open_rolling_writer, RotationError};
use crate::severity::{active_bands, SeverityBand};
use crate::sink::{FanoutWriter, SinkTopology};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Rotation error: {0}")]
    Rotation(#[from] RotationError),

    #[error("A global logger is already installed: {0}")]
    AlreadyInstalled(#[from] SetGlobalDefaultError),
}

/// One active processing path: a severity band paired with the sink its
/// encoder writes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingCore {
    pub band: SeverityBand,
    pub sink: SinkTopology,
}

/// A configured logging handle: the composed dispatcher plus the active
/// processing cores behind it.
pub struct Logger {
    dispatch: Dispatch,
    cores: Vec<ProcessingCore>,
    log_dir: Option<PathBuf>,
}

impl Logger {
    /// The dispatcher for this logger. Hand it to
    /// `tracing::dispatcher::with_default` to scope it to a closure.
    #[must_use]
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// The active processing cores, in severity order.
    #[must_use]
    pub fn cores(&self) -> &[ProcessingCore] {
        &self.cores
    }

    /// The directory file sinks write to, when file sinks are active.
    #[must_use]
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Install this logger as the process-wide default.
    pub fn install(self) -> Result<(), BuildError> {
        tracing::dispatcher::set_global_default(self.dispatch)?;
        if let Some(dir) = self.log_dir {
            set_log_dir_path(dir);
        }
        Ok(())
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// One band's fmt layer: the encoder for the chosen format behind the band's
/// range filter, writing through the given sink. The encoder depends only on
/// the format, never on the destination, so a dual sink receives the exact
/// bytes the console receives.
fn band_layer<W>(band: SeverityBand, format: LogFormat, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = filter_fn(move |metadata| band.contains(metadata.level()));
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(filter)
            .boxed(),
        LogFormat::Normal => fmt::layer()
            .with_writer(writer)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_ansi(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn build_core(
    band: SeverityBand,
    resolved: &ResolvedConfig,
) -> Result<(ProcessingCore, BoxedLayer), BuildError> {
    match resolved.destination {
        LogDestination::Console => {
            let core = ProcessingCore {
                band,
                sink: SinkTopology::Console,
            };
            Ok((core, band_layer(band, resolved.format, std::io::stdout)))
        }
        LogDestination::File => {
            let roller = open_rolling_writer(&resolved.log_dir, band)?;
            let sinks: Vec<Box<dyn Write + Send>> =
                vec![Box::new(std::io::stdout()), Box::new(roller)];
            let writer = Mutex::new(FanoutWriter::new(sinks));
            let core = ProcessingCore {
                band,
                sink: SinkTopology::ConsoleAndFile(resolved.log_dir.join(band.file_name())),
            };
            Ok((core, band_layer(band, resolved.format, writer)))
        }
    }
}

/// Build a logger from the configuration.
///
/// Unset and unrecognized fields resolve to their defaults; configuration is
/// never rejected. Cores are built only for the bands active under the
/// resolved minimum priority.
///
/// # Errors
///
/// Returns an error only when file sinks are requested and the log directory
/// or a band's rotating file cannot be created.
pub fn build_logger(config: &LoggerConfig) -> Result<Logger, BuildError> {
    let resolved = config.resolve();

    let mut cores = Vec::new();
    let mut layers: Vec<BoxedLayer> = Vec::new();
    for band in active_bands(resolved.minimum_priority) {
        let (core, layer) = build_core(*band, &resolved)?;
        cores.push(core);
        layers.push(layer);
    }

    // RUST_LOG can narrow output at runtime; unset, the band filters alone decide
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    let subscriber = tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .with(ErrorLayer::default());

    let log_dir = match resolved.destination {
        LogDestination::File => Some(resolved.log_dir),
        LogDestination::Console => None,
    };

    Ok(Logger {
        dispatch: Dispatch::new(subscriber),
        cores,
        log_dir,
    })
}

/// Build the logger and install it as the process-wide default.
///
/// # Errors
///
/// Returns an error if a file sink cannot be created or a global logger is
/// already installed.
pub fn init_logging(config: &LoggerConfig) -> Result<()> {
    let logger = build_logger(config)?;
    logger.install()?;
    Ok(())
}
