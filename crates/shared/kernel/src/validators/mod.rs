//! Configuration validators.
//!
//! Every validator returns `Result<(), ValidationError>`; a failure is
//! always fatal to the caller. Error messages name the offending value and
//! the allowed set or range, and carry the rule that failed.

use plinth_domain::telemetry::{LogLevel, OverflowPolicy, TelemetryConfig};
use plinth_domain::value::Value;
use plinth_errors::ValidationError;
use std::fmt::Display;
use strum::VariantNames;

/// Settings structs that can check their own field constraints.
pub trait Validate {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first violated
    /// constraint.
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for TelemetryConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.service_name.is_empty() {
            return Err(ValidationError::for_field(
                "service_name",
                "service name must not be empty",
            )
            .with_rule("required"));
        }
        validate_sample_rate(self.sample_rate)?;
        if self.buffer_capacity == 0 {
            return Err(ValidationError::for_field(
                "buffer_capacity",
                "buffer capacity must be positive",
            )
            .with_rule("positive"));
        }
        if let Some(port) = self.port {
            validate_port(i64::from(port))?;
        }
        Ok(())
    }
}

/// Checks case-insensitive membership in [`LogLevel::VARIANTS`].
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the allowed levels.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LogLevel::VARIANTS.iter().any(|variant| variant.eq_ignore_ascii_case(level)) {
        return Ok(());
    }
    Err(ValidationError::for_field(
        "log_level",
        format!(
            "invalid log level '{level}', expected one of: {}",
            LogLevel::VARIANTS.join(", ")
        ),
    )
    .with_value(Value::from(level))
    .with_rule("choice"))
}

/// Checks that a sampling rate lies in `0.0..=1.0`.
///
/// # Errors
///
/// Returns a [`ValidationError`] for out-of-range values; NaN fails the
/// range check and is rejected with the same message.
pub fn validate_sample_rate(rate: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&rate) {
        return Ok(());
    }
    Err(ValidationError::for_field(
        "sample_rate",
        format!("sample rate {rate} out of range, expected 0.0..=1.0"),
    )
    .with_value(Value::from(rate))
    .with_rule("range"))
}

/// Checks that a port number lies in `1..=65535`.
///
/// Takes `i64` so that out-of-range inputs such as `0`, `65536`, or
/// negatives are representable and rejected rather than silently truncated.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the valid range.
pub fn validate_port(port: i64) -> Result<(), ValidationError> {
    if (1..=65_535).contains(&port) {
        return Ok(());
    }
    Err(ValidationError::for_field("port", format!("port {port} out of range, expected 1..=65535"))
        .with_value(Value::from(port))
        .with_rule("range"))
}

/// Checks that a dynamic value is numeric and strictly positive.
///
/// # Errors
///
/// Non-numeric values fail with rule `"numeric"`; numeric but non-positive
/// values fail with rule `"positive"`.
pub fn validate_positive(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Int(n) if *n > 0 => Ok(()),
        Value::Float(f) if *f > 0.0 => Ok(()),
        Value::Int(_) | Value::Float(_) => Err(ValidationError::new(format!(
            "value {value} must be positive"
        ))
        .with_value(value.clone())
        .with_rule("positive")),
        _ => Err(ValidationError::new(format!("value {value} is not numeric"))
            .with_value(value.clone())
            .with_rule("numeric")),
    }
}

/// Checks that a dynamic value is numeric and non-negative.
///
/// # Errors
///
/// Non-numeric values fail with rule `"numeric"`; negative values fail with
/// rule `"non_negative"`.
pub fn validate_non_negative(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Int(n) if *n >= 0 => Ok(()),
        Value::Float(f) if *f >= 0.0 => Ok(()),
        Value::Int(_) | Value::Float(_) => Err(ValidationError::new(format!(
            "value {value} must be non-negative"
        ))
        .with_value(value.clone())
        .with_rule("non_negative")),
        _ => Err(ValidationError::new(format!("value {value} is not numeric"))
            .with_value(value.clone())
            .with_rule("numeric")),
    }
}

/// Checks membership in [`OverflowPolicy::VARIANTS`].
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the allowed policies.
pub fn validate_overflow_policy(policy: &str) -> Result<(), ValidationError> {
    if OverflowPolicy::VARIANTS.contains(&policy) {
        return Ok(());
    }
    Err(ValidationError::for_field(
        "overflow_policy",
        format!(
            "invalid overflow policy '{policy}', expected one of: {}",
            OverflowPolicy::VARIANTS.join(", ")
        ),
    )
    .with_value(Value::from(policy))
    .with_rule("choice"))
}

/// Builds a validator that checks membership in `choices`.
pub fn validate_choice<T>(choices: Vec<T>) -> impl Fn(&T) -> Result<(), ValidationError>
where
    T: PartialEq + Display,
{
    move |candidate| {
        if choices.contains(candidate) {
            return Ok(());
        }
        let allowed = choices.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        Err(ValidationError::new(format!(
            "invalid value '{candidate}', expected one of: {allowed}"
        ))
        .with_value(Value::from(candidate.to_string()))
        .with_rule("choice"))
    }
}

/// Builds a validator that checks inclusion in `min..=max`.
pub fn validate_range<T>(min: T, max: T) -> impl Fn(T) -> Result<(), ValidationError>
where
    T: PartialOrd + Display + Copy,
{
    move |candidate| {
        if candidate < min || candidate > max {
            return Err(ValidationError::new(format!(
                "value {candidate} out of range, expected {min}..={max}"
            ))
            .with_value(Value::from(candidate.to_string()))
            .with_rule("range"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels_are_case_insensitive() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("WARN").is_ok());
        assert!(validate_log_level("Trace").is_ok());

        let err = validate_log_level("verbose").unwrap_err();
        assert_eq!(err.rule(), Some("choice"));
        assert!(err.message().contains("trace, debug, info, warn, error"));
    }

    #[test]
    fn sample_rate_bounds_are_inclusive() {
        assert!(validate_sample_rate(0.0).is_ok());
        assert!(validate_sample_rate(1.0).is_ok());
        assert!(validate_sample_rate(0.5).is_ok());

        assert!(validate_sample_rate(-0.1).is_err());
        assert!(validate_sample_rate(1.1).is_err());
        assert!(validate_sample_rate(f64::NAN).is_err());
    }

    #[test]
    fn port_bounds_are_inclusive() {
        assert!(validate_port(1).is_ok());
        assert!(validate_port(65_535).is_ok());

        assert!(validate_port(0).is_err());
        assert!(validate_port(65_536).is_err());
        assert!(validate_port(-1).is_err());
    }

    #[test]
    fn positivity_distinguishes_non_numeric_from_non_positive() {
        assert!(validate_positive(&Value::Int(3)).is_ok());
        assert!(validate_positive(&Value::Float(0.1)).is_ok());

        let non_positive = validate_positive(&Value::Int(0)).unwrap_err();
        assert_eq!(non_positive.rule(), Some("positive"));

        let non_numeric = validate_positive(&Value::from("three")).unwrap_err();
        assert_eq!(non_numeric.rule(), Some("numeric"));
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(validate_non_negative(&Value::Int(0)).is_ok());
        assert!(validate_non_negative(&Value::Float(0.0)).is_ok());

        let err = validate_non_negative(&Value::Int(-1)).unwrap_err();
        assert_eq!(err.rule(), Some("non_negative"));
    }

    #[test]
    fn overflow_policies_match_variants() {
        assert!(validate_overflow_policy("drop_oldest").is_ok());
        assert!(validate_overflow_policy("drop_newest").is_ok());
        assert!(validate_overflow_policy("block").is_ok());

        assert!(validate_overflow_policy("reject").is_err());
    }

    #[test]
    fn choice_factory_captures_allowed_set() {
        let allowed = validate_choice(vec!["red", "green", "blue"]);
        assert!(allowed(&"green").is_ok());

        let err = allowed(&"yellow").unwrap_err();
        assert_eq!(err.rule(), Some("choice"));
        assert!(err.message().contains("red, green, blue"));
    }

    #[test]
    fn range_factory_is_inclusive() {
        let within = validate_range(1, 10);
        assert!(within(1).is_ok());
        assert!(within(10).is_ok());
        assert!(within(0).is_err());
        assert!(within(11).is_err());

        let rates = validate_range(0.0, 1.0);
        assert!(rates(0.25).is_ok());
        assert!(rates(2.0).is_err());
    }

    #[test]
    fn telemetry_config_default_is_valid() {
        assert!(TelemetryConfig::default().validate().is_ok());
    }

    #[test]
    fn telemetry_config_rejects_bad_fields() {
        let config = TelemetryConfig { sample_rate: 2.0, ..TelemetryConfig::default() };
        assert!(config.validate().is_err());

        let config = TelemetryConfig { buffer_capacity: 0, ..TelemetryConfig::default() };
        assert_eq!(config.validate().unwrap_err().rule(), Some("positive"));

        let config = TelemetryConfig { port: Some(0), ..TelemetryConfig::default() };
        assert!(config.validate().is_err());
    }
}
