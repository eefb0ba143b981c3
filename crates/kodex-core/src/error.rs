//! Unified error types for Kodex.
//!
//! Plugin validation, discovery, and dispatch failures are all carried by
//! [`AppError`]; the [`ErrorKind`] tells callers which contract was broken.

use std::fmt;
use thiserror::Error;

/// Boxed error used as the underlying cause of an [`AppError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error kind categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A plugin or its manifest does not satisfy the plugin contract.
    Validation,
    /// A discovery candidate could not be loaded in strict mode.
    Load,
    /// A hook handler failed while dispatching in fail-fast mode.
    HookExecution,
    /// A plugin refused activation.
    Activation,
    /// A configuration error occurred.
    Configuration,
    /// A filesystem I/O error occurred.
    Io,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Load => write!(f, "LOAD"),
            Self::HookExecution => write!(f, "HOOK_EXECUTION"),
            Self::Activation => write!(f, "ACTIVATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Io => write!(f, "IO"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified error used throughout Kodex.
///
/// Crate-specific failures are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<BoxError>,
}

impl AppError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    ///
    /// Accepts concrete error types as well as `anyhow::Error`.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a load error.
    pub fn load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Load, message)
    }

    /// Create a hook execution error.
    pub fn hook_execution(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HookExecution, message)
    }

    /// Create an activation error.
    pub fn activation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Activation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Returns `true` if this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Renders the message followed by every underlying cause, one per line.
    pub fn chain(&self) -> String {
        let mut out = self.message.clone();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            out.push_str("\n  caused by: ");
            out.push_str(&err.to_string());
            cause = err.source();
        }
        out
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::validation("Plugin manifest name must be non-empty");
        assert_eq!(
            err.to_string(),
            "VALIDATION: Plugin manifest name must be non-empty"
        );
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn test_chain_lists_causes() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AppError::with_source(ErrorKind::Load, "Failed to load", io);
        let chain = err.chain();
        assert!(chain.starts_with("Failed to load"));
        assert!(chain.contains("caused by: gone"));
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AppError::with_source(ErrorKind::Io, "I/O error: boom", io);
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Io);
        assert!(cloned.source.is_none());
    }
}
