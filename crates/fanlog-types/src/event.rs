//! The per-call log event and its optional error payload.

use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use crate::LogLevel;

/// Opaque error object attached to an event.
///
/// Any `std::error::Error + Send + Sync` converts into a `LogError` with `?`
/// or `.into()`. Sinks decide how to render it; the core never inspects it.
/// Cloning is cheap, so every sink receiving an event refers to the same
/// underlying error value.
#[derive(Clone)]
pub struct LogError {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl LogError {
    /// Wrap an error value.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Build an error object from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    /// Borrow the wrapped error.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    /// Whether `self` and `other` wrap the very same error value.
    pub fn ptr_eq(&self, other: &LogError) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The error message followed by its `source()` chain, joined with `: `.
    pub fn chain(&self) -> String {
        let mut rendered = self.inner.to_string();
        let mut source = self.inner.source();
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        rendered
    }
}

impl<E> From<E> for LogError
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        LogError::new(error)
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl fmt::Debug for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

#[derive(Debug)]
struct MessageError(String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for MessageError {}

/// One log event, built when a logger method is called and handed to every
/// bound sink.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// Severity
    pub level: LogLevel,
    /// Message text
    pub message: String,
    /// Optional error object
    pub error: Option<LogError>,
    /// Optional stack trace text
    pub stack_trace: Option<String>,
    /// Name of the logger that produced the event
    pub source: String,
    /// Capture time, taken when the logger method was invoked
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    /// Create an event stamped with the current time.
    pub fn new(level: LogLevel, message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            error: None,
            stack_trace: None,
            source: source.into(),
            timestamp: Utc::now(),
        }
    }

    /// Attach an error object.
    pub fn with_error(mut self, error: Option<LogError>) -> Self {
        self.error = error;
        self
    }

    /// Attach a stack trace. Blank traces are stored as `None`.
    pub fn with_stack_trace(mut self, stack_trace: Option<String>) -> Self {
        self.stack_trace = stack_trace.filter(|trace| !trace.trim().is_empty());
        self
    }

    /// The stack trace, or an empty string when none was given.
    pub fn stack_trace_or_empty(&self) -> &str {
        self.stack_trace.as_deref().unwrap_or("")
    }

    /// The error rendered with its cause chain, if present.
    pub fn error_text(&self) -> Option<String> {
        self.error.as_ref().map(LogError::chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_conversion_and_chain() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "config.yml missing");
        let err: LogError = io_err.into();
        assert_eq!(err.to_string(), "config.yml missing");
        assert_eq!(err.chain(), "config.yml missing");

        let clone = err.clone();
        assert!(clone.ptr_eq(&err));
        assert!(!LogError::msg("other").ptr_eq(&err));
    }

    #[test]
    fn test_event_builders() {
        let event = LogEvent::new(LogLevel::Error, "boom", "App")
            .with_error(Some(LogError::msg("x")))
            .with_stack_trace(Some("   ".to_string()));

        assert_eq!(event.level, LogLevel::Error);
        assert_eq!(event.source, "App");
        assert_eq!(event.error_text().as_deref(), Some("x"));
        assert_eq!(event.stack_trace, None);
        assert_eq!(event.stack_trace_or_empty(), "");
    }
}
