//! # Telemetry
//!
//! A centralized logging utility for the platform.
//! It provides a unified way to configure console and file logging with
//! rotation, non-blocking I/O, environment-based filtering, and safe stream
//! selection for components that log before startup has finished.
//!
//! * Use [`TelemetryBuilder::env_filter`] to set module-directed filters
//!   (e.g., `"plinth=debug,hyper=info"`), in addition to `RUST_LOG`.
//! * [`get_logger`] hands out per-component loggers configured from the hub's
//!   config chain, guarded against re-entrant initialization.
//! * When file logging is configured, the non-blocking file writer doubles as
//!   the process-wide "main" stream; [`resolve_log_stream`] falls back to
//!   stderr while that slot is empty.
//!
//! ## Example
//!
//! ```rust
//! # use plinth_logger::{LogLevel, Telemetry};
//!
//! let _telemetry = Telemetry::builder()
//!     .name("my-app")
//!     .console(true)
//!     .level(LogLevel::Debug)
//!     .init()
//!     .unwrap();
//! ```

mod error;
mod factory;
mod stream;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::factory::{FoundationLogger, get_logger, get_logger_with};
pub use crate::stream::{
    LogStream, MemoryWriter, clear_main_stream, main_stream, parse_log_output, resolve_log_stream,
    safe_stderr, set_main_stream,
};
pub use plinth_domain::telemetry::{LogLevel, LogOutput};
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
pub struct SubscriberConfig {
    console: bool,
    output: LogOutput,
    path: Option<PathBuf>,
    level: LogLevel,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            console: true,
            output: LogOutput::Stderr,
            path: None,
            level: LogLevel::Info,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct TelemetryBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    config: SubscriberConfig,
    name: N,
    file_state: std::marker::PhantomData<F>,
}

impl<F: Sealed> TelemetryBuilder<NoName, F> {
    /// Sets the service name stamped on log records and files.
    pub fn name(self, name: impl Into<String>) -> TelemetryBuilder<WithName, F> {
        TelemetryBuilder {
            name: WithName(name.into()),
            config: self.config,
            file_state: std::marker::PhantomData,
        }
    }
}

impl TelemetryBuilder<WithName, WithFile> {
    /// Configures maximum number of log files to keep.
    #[must_use = "The builder must be configured before it can be used to initialize telemetry."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Configures the log file rotation strategy.
    #[must_use = "The builder must be configured before it can be used to initialize telemetry."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Enables JSON formatting for the file layer.
    #[must_use = "The builder must be configured before it can be used to initialize telemetry."]
    pub const fn json(mut self) -> Self {
        self.config.json = true;
        self
    }
}

impl<F: Sealed> TelemetryBuilder<WithName, F> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize telemetry."]
    pub const fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `plinth=debug,hyper=info`).
    ///
    /// Environment variables still override via `RUST_LOG`; this is a programmatic default.
    /// Invalid filters will cause [`TelemetryBuilder::init`] to return an error.
    #[must_use = "The builder must be configured before it can be used to initialize telemetry."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables console logging.
    #[must_use = "The builder must be configured before it can be used to initialize telemetry."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Selects the stream the console layer writes to.
    ///
    /// [`LogOutput::Main`] resolves through the main stream slot at init time
    /// and falls back to stderr while the slot is empty.
    #[must_use = "The builder must be configured before it can be used to initialize telemetry."]
    pub const fn output(mut self, output: LogOutput) -> Self {
        self.config.output = output;
        self
    }

    /// Sets the path to log files.
    pub fn path(self, path: impl Into<PathBuf>) -> TelemetryBuilder<WithName, WithFile> {
        let mut config = self.config;
        config.path = Some(path.into());
        TelemetryBuilder { config, name: self.name, file_state: std::marker::PhantomData }
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Telemetry`] handle. **Note:** This handle contains a [`WorkerGuard`]
    /// that must be kept alive for the duration of the program to ensure
    /// that non-blocking logs are flushed correctly.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Telemetry, LoggerError> {
        validate_config(&self.config, &self.name.0)?;

        let env_filter = build_env_filter(&self.config)?;

        let mut layers = Vec::new();

        if self.config.console {
            let console_stream = resolve_log_stream(self.config.output);
            // Ansi escapes only make sense on a terminal-backed stream.
            let ansi = matches!(console_stream, LogStream::Stdout | LogStream::Stderr);
            layers.push(layer().compact().with_ansi(ansi).with_writer(console_stream).boxed());
        }

        let mut main_writer = None;
        let guard = if let Some(path) = self.config.path {
            fs::create_dir_all(&path).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create path: {}", path.display()).into()),
            })?;

            let file_appender = RollingFileAppender::builder()
                .rotation(self.config.rotation)
                .filename_prefix(&self.name.0)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.config.max_files)
                .build(path)?;

            let (non_blocking, g) = tracing_appender::non_blocking(file_appender);
            main_writer = Some(non_blocking.clone());

            let file_layer = layer().with_writer(non_blocking).with_ansi(false);

            let boxed =
                if self.config.json { file_layer.json().boxed() } else { file_layer.boxed() };

            layers.push(boxed);
            Some(g)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        // Installed only after a successful init so that a failed second
        // init cannot clobber a slot owned by the first.
        if let Some(writer) = main_writer {
            set_main_stream(LogStream::NonBlocking(writer));
        }

        Ok(Telemetry { guard })
    }
}

/// A handle to the initialized logging system.
///
/// This struct holds the background worker guard. Drop this struct only
/// when the application is shutting down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Telemetry {
    guard: Option<WorkerGuard>,
}

impl Telemetry {
    /// Returns a new [`TelemetryBuilder`] to configure the global tracing subscriber.
    ///
    /// The `name` serves as the primary identifier for your logs and is used
    /// as a prefix for rolling log files (e.g., `my-app.2023-10-27.log`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use plinth_logger::{LogLevel, Telemetry};
    ///
    /// let _telemetry = Telemetry::builder()
    ///     .name("my-app")
    ///     .level(LogLevel::Debug)
    ///     .init()
    ///     .unwrap();
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize telemetry."]
    pub fn builder() -> TelemetryBuilder {
        TelemetryBuilder {
            config: SubscriberConfig::default(),
            name: NoName,
            file_state: std::marker::PhantomData,
        }
    }

    /// Manually triggers a flush of all pending logs in the non-blocking worker.
    ///
    /// While flushing happens automatically when this handle is dropped, this
    /// method acts as a best-effort synchronization point before shutdown.
    pub fn flush(&self) {
        tracing::debug!("Telemetry flushed");
    }

    /// Returns a reference to the underlying worker guard, if present.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Telemetry {
    fn drop(&mut self) {
        if self.guard.is_some() {
            // The slot holds a clone of the file writer this guard backs.
            clear_main_stream();
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate_config(config: &SubscriberConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Telemetry name cannot be empty".into(),
            context: None,
        });
    }

    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &SubscriberConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level_filter(config.level).into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}

const fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
    }
}
