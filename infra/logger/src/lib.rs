//! # Logger
//!
//! Installs the global `tracing` subscriber for a folio process: a compact console
//! layer, an optional rolling file layer written through a non-blocking worker, and
//! `RUST_LOG`-style filtering.
//!
//! ```rust
//! # use folio_logger::{LevelFilter, Logger};
//! let _logger = Logger::builder("folio-doc")
//!     .level(LevelFilter::DEBUG)
//!     .env_filter("folio_store=trace")
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

/// Line format of an output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Compact,
    Json,
}

#[derive(Debug)]
struct FileOutput {
    directory: PathBuf,
    rotation: Rotation,
    max_files: usize,
    format: Format,
}

/// Configures and installs the global subscriber. Obtained from [`Logger::builder`].
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    env_filter: Option<String>,
    console: Option<Format>,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Default level for targets without a directive.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Extra directives (e.g. `folio_store=debug,tower_http=info`).
    ///
    /// Replaces `RUST_LOG`; without it the environment is read.
    #[must_use]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.env_filter = Some(directives.into());
        self
    }

    /// Console output format, or `None` to silence the console.
    #[must_use]
    pub const fn console(mut self, format: Option<Format>) -> Self {
        self.console = format;
        self
    }

    /// Writes rolling log files named `<name>.<date>.log` into `directory`.
    #[must_use]
    pub fn file(mut self, directory: impl Into<PathBuf>) -> Self {
        self.file = Some(FileOutput {
            directory: directory.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            format: Format::Compact,
        });
        self
    }

    /// Rotation, retention and format of the file output. No-op without [`Self::file`].
    #[must_use]
    pub fn file_options(mut self, rotation: Rotation, max_files: usize, format: Format) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.rotation = rotation;
            file.max_files = max_files;
            file.format = format;
        }
        self
    }

    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive: it owns the file writer's worker guard.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an empty name, zero retention, bad
    /// directives or no outputs at all; [`LoggerError::Subscriber`] if a global
    /// subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.build_filter()?;

        let mut layers = Vec::new();
        match self.console {
            Some(Format::Compact) => layers.push(layer().compact().with_ansi(true).boxed()),
            Some(Format::Json) => layers.push(layer().json().boxed()),
            None => {}
        }

        let guard = match self.file {
            Some(file) => {
                std::fs::create_dir_all(&file.directory)
                    .context(format!("Failed to create {}", file.directory.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(file.rotation)
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(file.max_files)
                    .build(&file.directory)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(match file.format {
                    Format::Compact => file_layer.boxed(),
                    Format::Json => file_layer.json().boxed(),
                });
                Some(guard)
            }
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %self.name, "Logging initialized");

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        let invalid = |message: &'static str| LoggerError::InvalidConfiguration {
            message: message.into(),
            context: None,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("logger name cannot be empty"));
        }
        if self.file.as_ref().is_some_and(|file| file.max_files == 0) {
            return Err(invalid("max_files must be greater than zero"));
        }
        if self.console.is_none() && self.file.is_none() {
            return Err(invalid("no outputs enabled: enable the console or a log directory"));
        }
        Ok(())
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            Some(directives) => builder.parse(directives).map_err(|e| {
                LoggerError::InvalidConfiguration {
                    message: format!("invalid directives '{directives}': {e}").into(),
                    context: None,
                }
            }),
            None => Ok(builder.from_env_lossy()),
        }
    }
}

/// Handle to the installed logging system.
///
/// Dropping it flushes and stops the file writer.
#[must_use = "Dropping this handle stops background file logging."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder. `name` prefixes rolling log files.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            level: LevelFilter::INFO,
            env_filter: None,
            console: Some(Format::Compact),
            file: None,
        }
    }

    /// Whether a file writer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_compact_console() {
        let builder = Logger::builder("folio-test");
        assert_eq!(builder.console, Some(Format::Compact));
        assert_eq!(builder.level, LevelFilter::INFO);
        assert!(builder.file.is_none());
    }

    #[test]
    fn file_options_require_a_file() {
        let builder = Logger::builder("folio-test").file_options(Rotation::HOURLY, 3, Format::Json);
        assert!(builder.file.is_none());

        let builder = Logger::builder("folio-test")
            .file("logs")
            .file_options(Rotation::HOURLY, 3, Format::Json);
        let file = builder.file.as_ref().unwrap();
        assert_eq!(file.max_files, 3);
        assert_eq!(file.format, Format::Json);
    }

    #[test]
    fn rejects_invalid_settings_before_installing() {
        let no_outputs = Logger::builder("folio-test").console(None).init();
        assert!(matches!(no_outputs, Err(LoggerError::InvalidConfiguration { .. })));

        let blank = Logger::builder("  ").init();
        assert!(matches!(blank, Err(LoggerError::InvalidConfiguration { .. })));

        let zero = Logger::builder("folio-test")
            .file("logs")
            .file_options(Rotation::NEVER, 0, Format::Compact)
            .init();
        assert!(matches!(zero, Err(LoggerError::InvalidConfiguration { .. })));

        let directives = Logger::builder("folio-test").env_filter("folio_store=loud").init();
        assert!(matches!(directives, Err(LoggerError::InvalidConfiguration { .. })));
    }
}
