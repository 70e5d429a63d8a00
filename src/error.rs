//! Error types for startup and request dispatch.
//!
//! Startup errors are fatal: the process prints them and exits. Dispatch
//! errors are scoped to a single request and never take the server down.

use thiserror::Error;

/// Fatal errors raised while building the application context or binding
/// the listener. Any of these aborts startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("config load failed: {0}")]
    Config(#[from] config::ConfigError),

    /// `scan.package` was missing or empty in the startup configuration.
    #[error("scan.package is missing or empty in the startup configuration")]
    EmptyScanPackage,

    /// No registered component lives under the configured module root.
    #[error("scan root '{package}' not found: no components registered under it")]
    ScanRootNotFound { package: String },

    #[error("duplicate bean name '{name}'")]
    DuplicateBean { name: String },

    /// A controller constructor asked for a bean that is not registered.
    #[error("no such bean '{name}'")]
    NoSuchBean { name: String },

    /// A bean exists under the requested name but is not of the type the
    /// constructor expected.
    #[error("bean '{name}' is not of the expected type {expected}")]
    BeanTypeMismatch { name: String, expected: &'static str },

    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidRoutePattern { pattern: String, reason: String },

    #[error("invalid listen address '{addr}'")]
    InvalidAddress { addr: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while serving a single request. Each maps to an HTTP
/// status; the request fails, the server keeps running.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("missing query parameter '{name}'")]
    MissingParam { name: String },

    #[error("query parameter '{name}' has invalid value '{value}' (expected {expected})")]
    InvalidParam {
        name: String,
        value: String,
        expected: &'static str,
    },

    /// A handler accessed a bound argument with the wrong accessor. This is
    /// a programming error in the controller, surfaced as a server error.
    #[error("bound argument {index} is not a {expected}")]
    ArgumentKind { index: usize, expected: &'static str },

    #[error("handler failed: {0}")]
    Handler(String),
}

impl DispatchError {
    /// HTTP status this error maps to. Binding problems are the client's
    /// fault; everything else is a server error.
    pub const fn status(&self) -> u16 {
        match self {
            Self::MissingParam { .. } | Self::InvalidParam { .. } => 400,
            Self::ArgumentKind { .. } | Self::Handler(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_errors_are_client_errors() {
        let missing = DispatchError::MissingParam {
            name: "name".to_string(),
        };
        assert_eq!(missing.status(), 400);

        let invalid = DispatchError::InvalidParam {
            name: "a".to_string(),
            value: "abc".to_string(),
            expected: "integer",
        };
        assert_eq!(invalid.status(), 400);
    }

    #[test]
    fn handler_errors_are_server_errors() {
        assert_eq!(DispatchError::Handler("boom".to_string()).status(), 500);
        assert_eq!(
            DispatchError::ArgumentKind {
                index: 0,
                expected: "string",
            }
            .status(),
            500
        );
    }

    #[test]
    fn startup_error_messages_name_the_offender() {
        let err = StartupError::DuplicateBean {
            name: "demoService".to_string(),
        };
        assert!(err.to_string().contains("demoService"));

        let err = StartupError::ScanRootNotFound {
            package: "rust_mvc.nothing".to_string(),
        };
        assert!(err.to_string().contains("rust_mvc.nothing"));
    }
}
