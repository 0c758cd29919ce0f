//! Failures tied to a named resource (files, locks, registry entries, …).

use crate::FoundationError;
use crate::context::ErrorContext;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// An error acting on a resource.
///
/// Builder methods only apply to the variants they describe; on any other
/// variant they return `self` unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceError {
    /// The resource exists but cannot be used right now.
    #[error("{message}")]
    Unavailable {
        message: String,
        resource_type: Option<String>,
        resource_path: Option<PathBuf>,
        context: ErrorContext,
    },

    /// The resource does not exist.
    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: Option<String>,
        resource_id: Option<String>,
        context: ErrorContext,
    },

    /// Creation failed because the resource is already there.
    #[error("{message}")]
    AlreadyExists {
        message: String,
        resource_type: Option<String>,
        resource_id: Option<String>,
        context: ErrorContext,
    },

    /// A lock could not be acquired.
    #[error("{message}")]
    Lock {
        message: String,
        lock_path: Option<PathBuf>,
        timeout: Option<Duration>,
        context: ErrorContext,
    },
}

impl ResourceError {
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            resource_type: None,
            resource_path: None,
            context: ErrorContext::new(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource_type: None,
            resource_id: None,
            context: ErrorContext::new(),
        }
    }

    #[must_use]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            resource_type: None,
            resource_id: None,
            context: ErrorContext::new(),
        }
    }

    #[must_use]
    pub fn lock(message: impl Into<String>) -> Self {
        Self::Lock {
            message: message.into(),
            lock_path: None,
            timeout: None,
            context: ErrorContext::new(),
        }
    }

    /// Classify the resource, e.g. `"file"` or `"component"`.
    #[must_use]
    pub fn with_resource_type(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Unavailable { resource_type, context, .. }
            | Self::NotFound { resource_type, context, .. }
            | Self::AlreadyExists { resource_type, context, .. } => {
                let value = value.into();
                context.set("resource.type", value.as_str());
                *resource_type = Some(value);
            }
            Self::Lock { .. } => {}
        }
        self
    }

    /// Record the filesystem path ([`ResourceError::Unavailable`] only).
    #[must_use]
    pub fn with_resource_path(mut self, value: impl AsRef<Path>) -> Self {
        if let Self::Unavailable { resource_path, context, .. } = &mut self {
            let value = value.as_ref().to_path_buf();
            context.set("resource.path", value.as_path());
            *resource_path = Some(value);
        }
        self
    }

    /// Record the resource identifier (`NotFound`/`AlreadyExists` only).
    #[must_use]
    pub fn with_resource_id(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::NotFound { resource_id, context, .. }
            | Self::AlreadyExists { resource_id, context, .. } => {
                let value = value.into();
                context.set("resource.id", value.as_str());
                *resource_id = Some(value);
            }
            Self::Unavailable { .. } | Self::Lock { .. } => {}
        }
        self
    }

    /// Record the lock file path ([`ResourceError::Lock`] only).
    #[must_use]
    pub fn with_lock_path(mut self, value: impl AsRef<Path>) -> Self {
        if let Self::Lock { lock_path, context, .. } = &mut self {
            let value = value.as_ref().to_path_buf();
            context.set("lock.path", value.as_path());
            *lock_path = Some(value);
        }
        self
    }

    /// Record how long acquisition was allowed to wait ([`ResourceError::Lock`] only).
    #[must_use]
    pub fn with_timeout(mut self, value: Duration) -> Self {
        if let Self::Lock { timeout, context, .. } = &mut self {
            context.set("lock.timeout", value);
            *timeout = Some(value);
        }
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unavailable { message, .. }
            | Self::NotFound { message, .. }
            | Self::AlreadyExists { message, .. }
            | Self::Lock { message, .. } => message,
        }
    }
}

impl FoundationError for ResourceError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "RESOURCE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND_ERROR",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS_ERROR",
            Self::Lock { .. } => "LOCK_ERROR",
        }
    }

    fn context(&self) -> &ErrorContext {
        match self {
            Self::Unavailable { context, .. }
            | Self::NotFound { context, .. }
            | Self::AlreadyExists { context, .. }
            | Self::Lock { context, .. } => context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth_domain::value::Value;

    #[test]
    fn not_found_fills_resource_context() {
        let err = ResourceError::not_found("component missing")
            .with_resource_type("component")
            .with_resource_id("json_source");

        assert_eq!(err.code(), "NOT_FOUND_ERROR");
        assert_eq!(err.context().get("resource.type"), Some(&Value::from("component")));
        assert_eq!(err.context().get("resource.id"), Some(&Value::from("json_source")));
    }

    #[test]
    fn lock_uses_its_own_namespace() {
        let err = ResourceError::lock("could not acquire state lock")
            .with_lock_path("/var/run/app.lock")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(err.code(), "LOCK_ERROR");
        assert_eq!(
            err.context().get("lock.path"),
            Some(&Value::from("/var/run/app.lock"))
        );
        assert_eq!(err.context().get("lock.timeout"), Some(&Value::Float(5.0)));
    }

    #[test]
    fn resource_id_does_not_apply_to_unavailable() {
        let err = ResourceError::unavailable("disk full").with_resource_id("x");
        assert!(err.context().is_empty());
    }

    #[test]
    fn each_variant_has_a_distinct_code() {
        let codes = [
            ResourceError::unavailable("a").code(),
            ResourceError::not_found("b").code(),
            ResourceError::already_exists("c").code(),
            ResourceError::lock("d").code(),
        ];
        assert_eq!(codes, ["RESOURCE_ERROR", "NOT_FOUND_ERROR", "ALREADY_EXISTS_ERROR", "LOCK_ERROR"]);
    }
}
