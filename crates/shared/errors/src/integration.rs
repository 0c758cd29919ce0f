//! Failures at the boundary to external systems.

use crate::FoundationError;
use crate::context::ErrorContext;
use std::time::Duration;

/// An error talking to something outside the process.
///
/// Builder methods only apply to the variant they describe; on any other
/// variant they return `self` unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrationError {
    /// A remote service misbehaved (bad response, unexpected status, …).
    #[error("{message}")]
    Service {
        message: String,
        service: Option<String>,
        endpoint: Option<String>,
        status_code: Option<u16>,
        context: ErrorContext,
    },

    /// Transport-level connectivity failure.
    #[error("{message}")]
    Network {
        message: String,
        host: Option<String>,
        port: Option<u16>,
        context: ErrorContext,
    },

    /// An operation exceeded its time budget.
    #[error("{message}")]
    Timeout {
        message: String,
        limit: Option<Duration>,
        elapsed: Option<Duration>,
        context: ErrorContext,
    },
}

impl IntegrationError {
    #[must_use]
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
            service: None,
            endpoint: None,
            status_code: None,
            context: ErrorContext::new(),
        }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            host: None,
            port: None,
            context: ErrorContext::new(),
        }
    }

    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            limit: None,
            elapsed: None,
            context: ErrorContext::new(),
        }
    }

    /// Name the remote service ([`IntegrationError::Service`] only).
    #[must_use]
    pub fn with_service(mut self, name: impl Into<String>) -> Self {
        if let Self::Service { service, context, .. } = &mut self {
            let name = name.into();
            context.set("integration.service", name.as_str());
            *service = Some(name);
        }
        self
    }

    /// Name the endpoint that was called ([`IntegrationError::Service`] only).
    #[must_use]
    pub fn with_endpoint(mut self, value: impl Into<String>) -> Self {
        if let Self::Service { endpoint, context, .. } = &mut self {
            let value = value.into();
            context.set("integration.endpoint", value.as_str());
            *endpoint = Some(value);
        }
        self
    }

    /// Record the HTTP-ish status code ([`IntegrationError::Service`] only).
    #[must_use]
    pub fn with_status_code(mut self, code: u16) -> Self {
        if let Self::Service { status_code, context, .. } = &mut self {
            context.set("integration.status_code", code);
            *status_code = Some(code);
        }
        self
    }

    /// Record the peer host ([`IntegrationError::Network`] only).
    #[must_use]
    pub fn with_host(mut self, value: impl Into<String>) -> Self {
        if let Self::Network { host, context, .. } = &mut self {
            let value = value.into();
            context.set("network.host", value.as_str());
            *host = Some(value);
        }
        self
    }

    /// Record the peer port ([`IntegrationError::Network`] only).
    #[must_use]
    pub fn with_port(mut self, value: u16) -> Self {
        if let Self::Network { port, context, .. } = &mut self {
            context.set("network.port", value);
            *port = Some(value);
        }
        self
    }

    /// Record the configured time budget ([`IntegrationError::Timeout`] only).
    #[must_use]
    pub fn with_limit(mut self, value: Duration) -> Self {
        if let Self::Timeout { limit, context, .. } = &mut self {
            context.set("timeout.limit", value);
            *limit = Some(value);
        }
        self
    }

    /// Record how long the operation actually ran ([`IntegrationError::Timeout`] only).
    #[must_use]
    pub fn with_elapsed(mut self, value: Duration) -> Self {
        if let Self::Timeout { elapsed, context, .. } = &mut self {
            context.set("timeout.elapsed", value);
            *elapsed = Some(value);
        }
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Service { message, .. }
            | Self::Network { message, .. }
            | Self::Timeout { message, .. } => message,
        }
    }
}

impl FoundationError for IntegrationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Service { .. } => "INTEGRATION_ERROR",
            Self::Network { .. } => "NETWORK_ERROR",
            Self::Timeout { .. } => "TIMEOUT_ERROR",
        }
    }

    fn context(&self) -> &ErrorContext {
        match self {
            Self::Service { context, .. }
            | Self::Network { context, .. }
            | Self::Timeout { context, .. } => context,
        }
    }
}
