//! Named loggers.

use crate::dispatch::Dispatch;
use fanlog_types::{LogError, LogEvent, LogLevel, SharedSink};
use std::fmt;
use std::sync::Arc;

/// A named logger bound to a fixed, ordered list of sinks.
///
/// Cloning is cheap and clones share identity (see [`Logger::ptr_eq`]).
/// The name and sink list never change after construction.
///
/// Each level method stamps an event with the current time and the logger
/// name, hands it to every sink, and returns without waiting. The logger does
/// not filter by level; sinks apply their own minimum. The returned
/// [`Dispatch`] can be ignored, or awaited with
/// [`completion`](Dispatch::completion) to flush.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    name: String,
    sinks: Vec<SharedSink>,
}

macro_rules! level_methods {
    ($($level:ident => $plain:ident, $with:ident;)*) => {
        $(
            #[doc = concat!("Log `message` at ", stringify!($plain), " level.")]
            pub fn $plain(&self, message: impl Into<String>) -> Dispatch {
                self.log(LogLevel::$level, message, None, None)
            }

            #[doc = concat!("Log `message` at ", stringify!($plain), " level with an optional error object and stack trace.")]
            pub fn $with(
                &self,
                message: impl Into<String>,
                error: Option<LogError>,
                stack_trace: Option<String>,
            ) -> Dispatch {
                self.log(LogLevel::$level, message, error, stack_trace)
            }
        )*
    };
}

impl Logger {
    /// Create a logger. Usually obtained from a
    /// [`LogRegistry`](crate::LogRegistry) instead.
    pub fn new(name: impl Into<String>, sinks: Vec<SharedSink>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                name: name.into(),
                sinks,
            }),
        }
    }

    /// The logger name, used as the `source` of every event.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Bound sinks, in binding order.
    pub fn sinks(&self) -> &[SharedSink] {
        &self.inner.sinks
    }

    /// Names of the bound sinks, in binding order.
    pub fn sink_names(&self) -> Vec<String> {
        self.inner.sinks.iter().map(|s| s.name().to_string()).collect()
    }

    /// Whether this exact sink instance is bound to the logger.
    pub fn has_sink(&self, sink: &SharedSink) -> bool {
        self.inner.sinks.iter().any(|bound| same_sink(bound, sink))
    }

    /// Whether both handles refer to the same logger instance.
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Log at an arbitrary level.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        error: Option<LogError>,
        stack_trace: Option<String>,
    ) -> Dispatch {
        let event = LogEvent::new(level, message, self.inner.name.clone())
            .with_error(error)
            .with_stack_trace(stack_trace);
        Dispatch::start(event, &self.inner.sinks)
    }

    level_methods! {
        Verbose => verbose, verbose_with;
        Debug => debug, debug_with;
        Info => info, info_with;
        Warning => warning, warning_with;
        Error => error, error_with;
        Fatal => fatal, fatal_with;
        Wtf => wtf, wtf_with;
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("sinks", &self.sink_names())
            .finish()
    }
}

pub(crate) fn same_sink(a: &SharedSink, b: &SharedSink) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
