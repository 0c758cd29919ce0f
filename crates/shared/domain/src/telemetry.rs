//! Telemetry configuration shared across the platform.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, VariantNames};

/// Logging severity, ordered from most to least verbose.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Whether a record at `candidate` severity passes a threshold of `self`.
    #[must_use]
    pub fn allows(self, candidate: Self) -> bool {
        candidate >= self
    }
}

/// Destination stream for log records.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogOutput {
    /// Standard error (the conventional stream for diagnostics).
    #[default]
    Stderr,
    /// Standard output, for pipelines that capture it.
    Stdout,
    /// The process-wide "main" stream configured at startup.
    Main,
}

/// What to do with new records once a bounded buffer is full.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OverflowPolicy {
    /// Evict the oldest buffered record to make room.
    #[default]
    DropOldest,
    /// Discard the incoming record.
    DropNewest,
    /// Apply backpressure to the producer.
    Block,
}

/// Telemetry settings consumed by the logger factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name stamped on every record; must be non-empty.
    pub service_name: String,
    pub log_level: LogLevel,
    pub log_output: LogOutput,
    /// Fraction of records to keep, in `0.0..=1.0`.
    pub sample_rate: f64,
    /// Bounded buffer capacity for in-memory sinks; must be positive.
    pub buffer_capacity: usize,
    pub overflow_policy: OverflowPolicy,
    /// Optional telemetry export port (`1..=65535`).
    pub port: Option<u16>,
}

// --- Default ---

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "plinth".to_owned(),
            log_level: LogLevel::default(),
            log_output: LogOutput::default(),
            sample_rate: 1.0,
            buffer_capacity: 1024,
            overflow_policy: OverflowPolicy::default(),
            port: None,
        }
    }
}
