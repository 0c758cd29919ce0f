//! JSON encode/decode with platform error mapping.

use crate::cache::serialization_cache;
use plinth_errors::ValidationError;
use plinth_hash::cache_key;
use serde::Serialize;
use tracing::trace;

/// Knobs for [`json_dumps_with`].
///
/// Dynamic maps serialize with sorted keys already (the value types are
/// backed by ordered maps), so only the layout is configurable.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// Pretty-print with this indent width; `None` emits compact output.
    pub indent: Option<usize>,
}

/// Serialize `value` to a compact JSON string.
///
/// # Errors
///
/// [`ValidationError`] (rule `serialize`) when the value cannot be
/// represented as JSON, e.g. a map with non-string keys.
pub fn json_dumps<T: Serialize>(value: &T) -> Result<String, ValidationError> {
    json_dumps_with(value, &DumpOptions::default())
}

/// Serialize `value` with explicit layout options.
///
/// # Errors
///
/// [`ValidationError`] (rule `serialize`) when the value cannot be
/// represented as JSON.
pub fn json_dumps_with<T: Serialize>(
    value: &T,
    options: &DumpOptions,
) -> Result<String, ValidationError> {
    let Some(indent) = options.indent else {
        return serde_json::to_string(value).map_err(serialize_error);
    };

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer).map_err(serialize_error)?;

    String::from_utf8(out).map_err(|err| {
        ValidationError::new(format!("serializer produced invalid UTF-8: {err}"))
            .with_rule("serialize")
    })
}

/// Parse a JSON document, consulting the process cache first.
///
/// Identical payloads hit the cached document instead of the parser.
///
/// # Errors
///
/// [`ValidationError`] (rule `deserialize`, context `json.line` /
/// `json.column`) when the payload is not valid JSON. Failures are not
/// cached.
pub fn json_loads(payload: &str) -> Result<serde_json::Value, ValidationError> {
    let key = cache_key(payload, "json");
    if let Some(document) = serialization_cache().get(&key) {
        trace!(key, "Serialization cache hit");
        return Ok(document);
    }

    let document = json_loads_uncached(payload)?;
    serialization_cache().insert(key, document.clone());
    Ok(document)
}

/// Parse a JSON document, bypassing the cache entirely.
///
/// # Errors
///
/// [`ValidationError`] (rule `deserialize`) when the payload is not valid
/// JSON.
pub fn json_loads_uncached(payload: &str) -> Result<serde_json::Value, ValidationError> {
    serde_json::from_str(payload).map_err(|err| {
        ValidationError::new(format!("invalid JSON: {err}"))
            .with_rule("deserialize")
            .with_context("json.line", i64::try_from(err.line()).unwrap_or(i64::MAX))
            .with_context("json.column", i64::try_from(err.column()).unwrap_or(i64::MAX))
    })
}

fn serialize_error(err: serde_json::Error) -> ValidationError {
    ValidationError::new(format!("value not serializable: {err}")).with_rule("serialize")
}
