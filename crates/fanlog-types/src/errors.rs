//! Error types for fanlog operations.

use thiserror::Error;

/// The main error type for fanlog operations.
///
/// Two families matter to callers. `Config` and `Validation` are programming
/// errors surfaced synchronously by registry and configuration operations.
/// `Delivery`, `Transport` and `Io` are what a sink returns from
/// [`LogSink::deliver`](crate::LogSink::deliver); the dispatcher contains those
/// and never hands them back to the code that emitted the event.
#[derive(Error, Debug)]
pub enum FanlogError {
    /// Invalid configuration or malformed registry input
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A sink failed to deliver an event
    #[error("Delivery error in sink '{sink}': {message}")]
    Delivery {
        /// Name of the failing sink
        sink: String,
        /// What went wrong
        message: String,
    },

    /// Remote transport failure (unreachable endpoint, non-2xx response)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal bug - should never happen in production
    #[error("Bug detected: {0}\n\nThis is an internal error. Please report this issue at:\nhttps://github.com/fanlog-rs/fanlog/issues")]
    Bug(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl FanlogError {
    /// Build a delivery failure attributed to `sink`.
    pub fn delivery(sink: impl Into<String>, message: impl Into<String>) -> Self {
        FanlogError::Delivery {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a configuration problem rather than a runtime
    /// delivery failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, FanlogError::Config(_) | FanlogError::Validation(_))
    }
}

/// A specialized Result type for fanlog operations.
pub type Result<T> = std::result::Result<T, FanlogError>;

/// Helper macro to create and return a FanlogError::Bug
///
/// This should be used for conditions that should never occur
/// in normal operation and indicate a bug in fanlog itself.
///
/// # Example
///
/// ```ignore
/// if some_impossible_condition {
///     bug!("This should never happen: {:?}", condition);
/// }
/// ```
#[macro_export]
macro_rules! bug {
    ($msg:expr) => {
        return Err($crate::FanlogError::Bug($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::FanlogError::Bug(format!($fmt, $($arg)*)))
    };
}

/// Helper macro to bail out with a FanlogError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```ignore
/// if name.is_empty() {
///     bail!(Config, "Logger name must not be empty");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::FanlogError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::FanlogError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::FanlogError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::FanlogError::Other(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject_empty(name: &str) -> Result<()> {
        if name.is_empty() {
            bail!(Config, "name must not be empty");
        }
        Ok(())
    }

    #[test]
    fn test_bail_builds_variant() {
        let err = reject_empty("").unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Configuration error: name must not be empty");
        assert!(reject_empty("app").is_ok());
    }

    #[test]
    fn test_delivery_display() {
        let err = FanlogError::delivery("remote", "connection refused");
        assert!(!err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Delivery error in sink 'remote': connection refused"
        );
    }
}
