//! Logger factory with a thread-local recursion guard.
//!
//! Building a configured logger consults the hub's config chain, and a config
//! source may itself ask for a logger while answering. The factory breaks that
//! cycle with a per-thread depth counter: any nested call on the same thread
//! gets a bare fallback logger immediately instead of recursing. The counter
//! is advisory and thread-local, so concurrent threads initialize
//! independently; it is not a lock.

use crate::stream::parse_log_output;
use plinth_domain::telemetry::{LogLevel, LogOutput};
use plinth_hub::Hub;
use std::cell::Cell;
use std::sync::Arc;

const MAX_RECURSION_DEPTH: u32 = 3;

thread_local! {
    static DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// Restores the previous recursion depth when dropped, on every exit path.
struct DepthGuard {
    previous: u32,
}

impl DepthGuard {
    fn acquire() -> Self {
        let previous = DEPTH.get();
        DEPTH.set(previous + 1);
        Self { previous }
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.set(self.previous);
    }
}

/// A named logger gated on a minimum severity, emitting through `tracing`.
///
/// Every record carries the logger name as a `logger` field, so records from
/// different components are distinguishable in one subscriber.
#[derive(Debug, Clone)]
pub struct FoundationLogger {
    name: Arc<str>,
    level: LogLevel,
    output: LogOutput,
}

impl FoundationLogger {
    fn new(name: &str, level: LogLevel, output: LogOutput) -> Self {
        Self { name: Arc::from(name), level, output }
    }

    /// The bare fallback logger with default level and output.
    fn bare(name: &str) -> Self {
        Self::new(name, LogLevel::default(), LogOutput::default())
    }

    /// Name stamped on every record as the `logger` field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum severity this logger emits.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Stream preference this logger was configured with.
    #[must_use]
    pub const fn output(&self) -> LogOutput {
        self.output
    }

    /// Whether a record at `level` would be emitted.
    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.level.allows(level)
    }

    pub fn trace(&self, message: &str) {
        if self.is_enabled(LogLevel::Trace) {
            tracing::trace!(logger = %self.name, "{message}");
        }
    }

    pub fn debug(&self, message: &str) {
        if self.is_enabled(LogLevel::Debug) {
            tracing::debug!(logger = %self.name, "{message}");
        }
    }

    pub fn info(&self, message: &str) {
        if self.is_enabled(LogLevel::Info) {
            tracing::info!(logger = %self.name, "{message}");
        }
    }

    pub fn warn(&self, message: &str) {
        if self.is_enabled(LogLevel::Warn) {
            tracing::warn!(logger = %self.name, "{message}");
        }
    }

    pub fn error(&self, message: &str) {
        if self.is_enabled(LogLevel::Error) {
            tracing::error!(logger = %self.name, "{message}");
        }
    }
}

/// Returns a logger for `name`, configured from the global hub's config chain.
///
/// Nested calls on the same thread, calls past the depth limit, and any
/// configuration failure all produce the bare fallback logger. The factory
/// never errors and never recurses.
#[must_use]
pub fn get_logger(name: &str) -> FoundationLogger {
    build_logger(Hub::global(), name)
}

/// [`get_logger`] against an explicit hub instead of the global one.
#[must_use]
pub fn get_logger_with(hub: &Hub, name: &str) -> FoundationLogger {
    build_logger(hub, name)
}

fn build_logger(hub: &Hub, name: &str) -> FoundationLogger {
    let depth = DEPTH.get();
    if depth > 0 || depth >= MAX_RECURSION_DEPTH {
        return FoundationLogger::bare(name);
    }

    let _guard = DepthGuard::acquire();
    configured_logger(hub, name)
}

/// Consults the config chain for `log_level` and `log_output`.
///
/// Missing or malformed values fall back to the defaults silently; a half
/// configured chain is an expected state during bootstrap, not an error.
fn configured_logger(hub: &Hub, name: &str) -> FoundationLogger {
    let level = hub
        .resolve_config_value("log_level")
        .and_then(|value| value.as_str().and_then(|raw| raw.parse().ok()))
        .unwrap_or_default();

    let output = hub
        .resolve_config_value("log_output")
        .and_then(|value| value.as_str().map(parse_log_output))
        .unwrap_or_default();

    FoundationLogger::new(name, level, output)
}
