//! Validation failures: always fatal to the calling operation, never retried.

use crate::FoundationError;
use crate::context::ErrorContext;
use plinth_domain::value::Value;
use std::borrow::Cow;

/// A rejected input value.
///
/// Raised by the config validators, serialization glue and environment
/// parsing. The optional `field`/`value`/`rule` data is mirrored into
/// [`ErrorContext`] under `validation.*` keys.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    field: Option<String>,
    value: Option<Value>,
    rule: Option<Cow<'static, str>>,
    context: ErrorContext,
}

impl ValidationError {
    pub const CODE: &'static str = "VALIDATION_ERROR";

    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            value: None,
            rule: None,
            context: ErrorContext::new(),
        }
    }

    /// A validation failure scoped to a named field.
    #[must_use]
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field = field.into();
        let mut err = Self::new(message);
        err.context.set("validation.field", field.as_str());
        err.field = Some(field);
        err
    }

    /// Attach the offending value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.context.set("validation.value", value.clone());
        self.value = Some(value);
        self
    }

    /// Attach the rule that rejected the value, e.g. `"range"` or `"choice"`.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<Cow<'static, str>>) -> Self {
        let rule = rule.into();
        self.context.set("validation.rule", rule.clone());
        self.rule = Some(rule);
        self
    }

    /// Attach an arbitrary context entry, e.g. a parser position.
    #[must_use]
    pub fn with_context(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        self.context.set(key, value);
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }
}

impl FoundationError for ValidationError {
    fn code(&self) -> &'static str {
        Self::CODE
    }

    fn context(&self) -> &ErrorContext {
        &self.context
    }
}
