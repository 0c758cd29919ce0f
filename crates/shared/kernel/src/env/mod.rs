//! Typed environment readers under a prefix convention.
//!
//! [`EnvPrefix`] turns logical names like `debug-mode` or `database.url`
//! into fully-qualified variable names (`MYAPP_DEBUG_MODE`,
//! `MYAPP_DATABASE_URL`) and reads them with typed parsing. Absent
//! variables are `Ok(None)`; malformed values are validation errors naming
//! the variable.

use moka::sync::Cache;
use plinth_domain::value::{ConfigMap, Value};
use plinth_errors::ValidationError;
use plinth_hub::{ConfigSource, HubError};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::PathBuf;

const NAME_CACHE_CAPACITY: u64 = 128;

/// A prefix-scoped view of the process environment.
///
/// # Examples
///
/// ```rust
/// use plinth_kernel::env::EnvPrefix;
///
/// let env = EnvPrefix::new("myapp");
/// assert_eq!(env.var_name("debug-mode"), "MYAPP_DEBUG_MODE");
/// assert_eq!(env.var_name("database.url"), "MYAPP_DATABASE_URL");
/// ```
#[derive(Clone)]
pub struct EnvPrefix {
    prefix: String,
    separator: String,
    names: Cache<String, String>,
}

impl EnvPrefix {
    /// Creates a reader with the conventional `"_"` separator.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_separator(prefix, "_")
    }

    /// Creates a reader with an explicit separator between prefix and name.
    #[must_use]
    pub fn with_separator(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().to_uppercase(),
            separator: separator.into(),
            names: Cache::builder().max_capacity(NAME_CACHE_CAPACITY).build(),
        }
    }

    /// The uppercased prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The separator between prefix and normalized name.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Fully-qualified variable name for `name`.
    ///
    /// The name is uppercased with `-` and `.` mapped to `_`. Built names
    /// are cached keyed by the original `name` string, so repeated lookups
    /// skip the normalization.
    #[must_use]
    pub fn var_name(&self, name: &str) -> String {
        self.names.get_with(name.to_owned(), || {
            let normalized = name.to_uppercase().replace(['-', '.'], "_");
            format!("{}{}{normalized}", self.prefix, self.separator)
        })
    }

    /// Reads a boolean.
    ///
    /// True values are `true`, `1`, `yes`, `on`; false values are `false`,
    /// `0`, `no`, `off`; both case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for any other value.
    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, ValidationError> {
        self.get_parsed(name, parse_bool)
    }

    /// Reads an `i64`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the value does not parse.
    pub fn get_int(&self, name: &str) -> Result<Option<i64>, ValidationError> {
        self.get_parsed(name, parse_int)
    }

    /// Reads an `f64`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the value does not parse.
    pub fn get_float(&self, name: &str) -> Result<Option<f64>, ValidationError> {
        self.get_parsed(name, parse_float)
    }

    /// Reads a string verbatim.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the getter surface uniform.
    pub fn get_str(&self, name: &str) -> Result<Option<String>, ValidationError> {
        self.get_parsed(name, |raw, _| Ok(raw.to_owned()))
    }

    /// Reads a filesystem path.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the getter surface uniform.
    pub fn get_path(&self, name: &str) -> Result<Option<PathBuf>, ValidationError> {
        self.get_parsed(name, |raw, _| Ok(PathBuf::from(raw)))
    }

    /// Reads a comma-separated list; entries are trimmed and empties
    /// dropped.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the getter surface uniform.
    pub fn get_list(&self, name: &str) -> Result<Option<Vec<String>>, ValidationError> {
        self.get_parsed(name, |raw, _| Ok(parse_list(raw)))
    }

    /// Reads comma-separated `key=value` pairs into a sorted map.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a pair has no `=`.
    pub fn get_map(&self, name: &str) -> Result<Option<BTreeMap<String, String>>, ValidationError> {
        self.get_parsed(name, parse_map)
    }

    /// Reads and parses a variable that must be present.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with rule `"required"` naming the
    /// fully-qualified variable when it is absent, or the parse error when
    /// it is malformed.
    pub fn require<T: FromEnvValue>(&self, name: &str) -> Result<T, ValidationError> {
        let var = self.var_name(name);
        match env::var(&var) {
            Ok(raw) => T::from_env_value(&raw, &var),
            Err(_) => {
                let message = format!("required environment variable {var} is not set");
                Err(ValidationError::for_field(var, message).with_rule("required"))
            }
        }
    }

    /// Returns `true` when the fully-qualified variable is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        env::var_os(self.var_name(name)).is_some()
    }

    /// Scans the process environment for variables under this prefix.
    ///
    /// Keys in the result are de-prefixed but otherwise untouched, mapped
    /// to their raw values.
    #[must_use]
    pub fn all_with_prefix(&self) -> BTreeMap<String, String> {
        let full_prefix = format!("{}{}", self.prefix, self.separator);
        env::vars()
            .filter_map(|(key, value)| {
                key.strip_prefix(&full_prefix).map(|stripped| (stripped.to_owned(), value))
            })
            .collect()
    }

    fn get_parsed<T>(
        &self,
        name: &str,
        parse: impl Fn(&str, &str) -> Result<T, ValidationError>,
    ) -> Result<Option<T>, ValidationError> {
        let var = self.var_name(name);
        match env::var(&var) {
            Ok(raw) => parse(&raw, &var).map(Some),
            Err(_) => Ok(None),
        }
    }
}

impl fmt::Debug for EnvPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvPrefix")
            .field("prefix", &self.prefix)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

/// Typed parsing seam used by [`EnvPrefix::require`].
pub trait FromEnvValue: Sized {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming `var` when `raw` does not
    /// parse.
    fn from_env_value(raw: &str, var: &str) -> Result<Self, ValidationError>;
}

impl FromEnvValue for bool {
    fn from_env_value(raw: &str, var: &str) -> Result<Self, ValidationError> {
        parse_bool(raw, var)
    }
}

impl FromEnvValue for i64 {
    fn from_env_value(raw: &str, var: &str) -> Result<Self, ValidationError> {
        parse_int(raw, var)
    }
}

impl FromEnvValue for f64 {
    fn from_env_value(raw: &str, var: &str) -> Result<Self, ValidationError> {
        parse_float(raw, var)
    }
}

impl FromEnvValue for String {
    fn from_env_value(raw: &str, _var: &str) -> Result<Self, ValidationError> {
        Ok(raw.to_owned())
    }
}

impl FromEnvValue for PathBuf {
    fn from_env_value(raw: &str, _var: &str) -> Result<Self, ValidationError> {
        Ok(Self::from(raw))
    }
}

impl FromEnvValue for Vec<String> {
    fn from_env_value(raw: &str, _var: &str) -> Result<Self, ValidationError> {
        Ok(parse_list(raw))
    }
}

fn parse_bool(raw: &str, var: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ValidationError::for_field(var, format!("invalid boolean '{raw}' in {var}"))
            .with_value(Value::from(raw))
            .with_rule("bool")),
    }
}

fn parse_int(raw: &str, var: &str) -> Result<i64, ValidationError> {
    raw.trim().parse().map_err(|_| {
        ValidationError::for_field(var, format!("invalid integer '{raw}' in {var}"))
            .with_value(Value::from(raw))
            .with_rule("int")
    })
}

fn parse_float(raw: &str, var: &str) -> Result<f64, ValidationError> {
    raw.trim().parse().map_err(|_| {
        ValidationError::for_field(var, format!("invalid float '{raw}' in {var}"))
            .with_value(Value::from(raw))
            .with_rule("float")
    })
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_map(raw: &str, var: &str) -> Result<BTreeMap<String, String>, ValidationError> {
    let mut map = BTreeMap::new();
    for pair in raw.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(ValidationError::for_field(
                var,
                format!("invalid key=value pair '{pair}' in {var}"),
            )
            .with_value(Value::from(raw))
            .with_rule("map"));
        };
        map.insert(key.trim().to_owned(), value.trim().to_owned());
    }
    Ok(map)
}

/// Environment-backed [`ConfigSource`] for the hub's config chain.
///
/// Requested keys go through [`EnvPrefix::var_name`], so dots map to
/// underscores and `database.url` reads `{PREFIX}_DATABASE_URL`. Bulk loads
/// lowercase the de-prefixed names to match file-config key conventions.
#[derive(Debug, Clone)]
pub struct EnvConfigSource {
    name: String,
    env: EnvPrefix,
}

impl EnvConfigSource {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        let env = EnvPrefix::new(prefix);
        Self { name: format!("env:{}", env.prefix().to_lowercase()), env }
    }
}

impl ConfigSource for EnvConfigSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>, HubError> {
        Ok(env::var(self.env.var_name(key)).ok().map(Value::from))
    }

    fn load(&self) -> Result<ConfigMap, HubError> {
        Ok(self
            .env
            .all_with_prefix()
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), Value::from(value)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_parsing_accepts_both_casings() {
        for raw in ["true", "1", "YES", "On"] {
            assert!(parse_bool(raw, "VAR").unwrap(), "{raw}");
        }
        for raw in ["false", "0", "No", "OFF"] {
            assert!(!parse_bool(raw, "VAR").unwrap(), "{raw}");
        }

        let err = parse_bool("maybe", "MYAPP_FLAG").unwrap_err();
        assert_eq!(err.rule(), Some("bool"));
        assert!(err.message().contains("MYAPP_FLAG"));
    }

    #[test]
    fn numeric_parsing_trims_whitespace() {
        assert_eq!(parse_int(" 42 ", "VAR").unwrap(), 42);
        assert_eq!(parse_float("0.25", "VAR").unwrap(), 0.25);

        assert_eq!(parse_int("4x2", "VAR").unwrap_err().rule(), Some("int"));
        assert_eq!(parse_float("fast", "VAR").unwrap_err().rule(), Some("float"));
    }

    #[test]
    fn list_parsing_trims_and_drops_empties() {
        assert_eq!(parse_list("a, b , ,c,"), ["a", "b", "c"]);
        assert!(parse_list("  ").is_empty());
    }

    #[test]
    fn map_parsing_splits_pairs() {
        let map = parse_map("a=1, b = two ,c=3", "VAR").unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["b"], "two");

        assert_eq!(parse_map("a=1,broken", "VAR").unwrap_err().rule(), Some("map"));
    }

    #[test]
    fn var_names_are_cached_by_original_name() {
        let env = EnvPrefix::new("myapp");
        assert_eq!(env.var_name("debug-mode"), "MYAPP_DEBUG_MODE");
        assert_eq!(env.var_name("debug-mode"), "MYAPP_DEBUG_MODE");

        env.names.run_pending_tasks();
        assert_eq!(env.names.entry_count(), 1);
    }

    #[test]
    fn separator_is_configurable() {
        let env = EnvPrefix::with_separator("svc", "__");
        assert_eq!(env.var_name("database.url"), "SVC__DATABASE_URL");
    }
}
