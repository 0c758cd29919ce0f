//! Log stream selection with graceful fallback.
//!
//! Resolution never fails. Requesting a stream that is unavailable yields a
//! safe default instead of an error, so the logging subsystem can bootstrap
//! before the rest of the process is wired up.

use parking_lot::{Mutex, RwLock};
use plinth_domain::telemetry::LogOutput;
use std::fmt;
use std::io;
use std::sync::Arc;
use tracing::warn;
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::fmt::MakeWriter;

/// Process-wide slot for the "main" log stream.
///
/// [`TelemetryBuilder::init`](crate::TelemetryBuilder::init) installs the
/// non-blocking file writer here when file logging is configured; the
/// [`Telemetry`](crate::Telemetry) handle clears it again on drop. The slot
/// being empty is a normal state during early bootstrap.
static MAIN_STREAM: RwLock<Option<LogStream>> = RwLock::new(None);

/// A shared in-memory byte sink.
///
/// Clones write into the same buffer. This is the capture target for tests
/// and the graceful fallback when no real stream is available.
#[derive(Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

impl fmt::Debug for MemoryWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryWriter")
            .field("len", &self.buffer.lock().len())
            .finish_non_exhaustive()
    }
}

impl io::Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A concrete log destination.
///
/// Implements both [`io::Write`] and [`MakeWriter`], so it can be handed
/// directly to a `tracing_subscriber` fmt layer or written to by hand.
#[derive(Debug, Clone)]
pub enum LogStream {
    /// Process standard output.
    Stdout,
    /// Process standard error.
    Stderr,
    /// Shared in-memory buffer.
    Memory(MemoryWriter),
    /// Non-blocking writer backed by a rolling file appender.
    NonBlocking(NonBlocking),
}

impl io::Write for LogStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout => io::stdout().write(buf),
            Self::Stderr => io::stderr().write(buf),
            Self::Memory(writer) => writer.write(buf),
            Self::NonBlocking(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().flush(),
            Self::Stderr => io::stderr().flush(),
            Self::Memory(writer) => writer.flush(),
            Self::NonBlocking(writer) => writer.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogStream {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Returns the safest stream for diagnostics.
///
/// Stderr cannot be observed as closed or missing here, so this always
/// resolves to [`LogStream::Stderr`]; callers that need a capturable sink
/// install a [`LogStream::Memory`] as the main stream instead.
#[must_use]
pub fn safe_stderr() -> LogStream {
    LogStream::Stderr
}

/// Resolves a [`LogOutput`] setting to a concrete stream.
///
/// `Main` resolves to the installed main stream; while the slot is still
/// empty (early bootstrap) it falls back to [`safe_stderr`].
#[must_use]
pub fn resolve_log_stream(output: LogOutput) -> LogStream {
    match output {
        LogOutput::Stdout => LogStream::Stdout,
        LogOutput::Stderr => safe_stderr(),
        LogOutput::Main => main_stream().unwrap_or_else(safe_stderr),
    }
}

/// Parses a log output setting, falling back to stderr on unknown values.
///
/// Emits a best-effort warning instead of returning an error; a bad setting
/// must not be able to abort logger bootstrap.
#[must_use]
pub fn parse_log_output(raw: &str) -> LogOutput {
    raw.parse().unwrap_or_else(|_| {
        warn!(value = raw, "Unknown log output setting, falling back to stderr");
        LogOutput::Stderr
    })
}

/// Installs `stream` as the process-wide main stream.
pub fn set_main_stream(stream: LogStream) {
    *MAIN_STREAM.write() = Some(stream);
}

/// Empties the main stream slot.
pub fn clear_main_stream() {
    *MAIN_STREAM.write() = None;
}

/// A clone of the currently installed main stream, if any.
#[must_use]
pub fn main_stream() -> Option<LogStream> {
    MAIN_STREAM.read().clone()
}
