//! The sink capability every output destination implements.

use async_trait::async_trait;
use std::sync::Arc;
use crate::errors::Result;
use crate::{LogEvent, LogLevel};

/// Trait for log output destinations (console, file, HTTP, user-defined).
///
/// Loggers fan each event out to their sinks without filtering. A sink that
/// wants less than everything applies its own [`minimum_level`] inside
/// [`deliver`] and returns `Ok(())` for events below it.
///
/// `deliver` may take as long as it needs. Each delivery runs in its own
/// task, so a slow or failing sink never holds up the caller or its
/// siblings. Errors returned here are reported as diagnostics and dropped.
///
/// [`minimum_level`]: LogSink::minimum_level
/// [`deliver`]: LogSink::deliver
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Human-readable identifier used in diagnostics. Need not be unique.
    fn name(&self) -> &str;

    /// Lowest level this sink wants to see.
    fn minimum_level(&self) -> LogLevel {
        LogLevel::Verbose
    }

    /// Whether an event at `level` passes this sink's own filter.
    fn accepts(&self, level: LogLevel) -> bool {
        level.meets_threshold(self.minimum_level())
    }

    /// Deliver one event.
    async fn deliver(&self, event: &LogEvent) -> Result<()>;
}

/// Sinks are shared between loggers and the registry.
pub type SharedSink = Arc<dyn LogSink>;
