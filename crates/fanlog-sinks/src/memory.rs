//! In-process capture sink.

use async_trait::async_trait;
use fanlog_types::{LogEvent, LogLevel, LogSink, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Keeps delivered events in memory.
///
/// With a capacity, the oldest events are dropped once it is reached.
pub struct MemorySink {
    name: String,
    minimum_level: LogLevel,
    capacity: Option<usize>,
    events: Mutex<VecDeque<LogEvent>>,
}

impl MemorySink {
    /// Unbounded sink named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minimum_level: LogLevel::Verbose,
            capacity: None,
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Keep at most `capacity` events.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Ignore events below `level`.
    pub fn with_minimum_level(mut self, level: LogLevel) -> Self {
        self.minimum_level = level;
        self
    }

    /// Snapshot of the captured events, oldest first.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Captured messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.message.clone()).collect()
    }

    /// Number of captured events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop every captured event.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl LogSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn minimum_level(&self) -> LogLevel {
        self.minimum_level
    }

    async fn deliver(&self, event: &LogEvent) -> Result<()> {
        if !self.accepts(event.level) {
            return Ok(());
        }

        let mut events = self.events.lock();
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return Ok(());
            }
            while events.len() >= capacity {
                events.pop_front();
            }
        }
        events.push_back(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_in_order() {
        let sink = MemorySink::new("mem").with_minimum_level(LogLevel::Info);

        for (level, message) in [
            (LogLevel::Debug, "dropped"),
            (LogLevel::Info, "one"),
            (LogLevel::Wtf, "two"),
        ] {
            sink.deliver(&LogEvent::new(level, message, "App")).await.unwrap();
        }

        assert_eq!(sink.messages(), vec!["one", "two"]);
        assert_eq!(sink.events()[1].level, LogLevel::Wtf);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_capacity_drops_oldest() {
        let sink = MemorySink::new("ring").with_capacity(2);

        for message in ["a", "b", "c"] {
            sink.deliver(&LogEvent::new(LogLevel::Info, message, "App"))
                .await
                .unwrap();
        }

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.messages(), vec!["b", "c"]);
    }
}
