//! The logger registry.
//!
//! A registry owns the globally registered sinks and a cache of named
//! loggers. Loggers created through [`LogRegistry::get_logger`] are bound to a
//! snapshot of the global sinks taken at creation time; registering more
//! sinks later does not touch loggers that already exist. Call
//! [`LogRegistry::refresh_logger`] to rebind one explicitly.
//!
//! All registry state sits behind one mutex. Sink delivery never happens
//! while it is held.

use crate::logger::{same_sink, Logger};
use fanlog_types::{bail, FanlogError, Result, SharedSink, DEFAULT_LOGGER_NAME};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

static GLOBAL: Lazy<LogRegistry> = Lazy::new(LogRegistry::new);

/// Registry of global sinks and named loggers.
pub struct LogRegistry {
    state: Mutex<RegistryState>,
}

struct RegistryState {
    default_name: String,
    global_sinks: Vec<SharedSink>,
    loggers: HashMap<String, Logger>,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_LOGGER_NAME.to_string(),
            global_sinks: Vec::new(),
            loggers: HashMap::new(),
        }
    }
}

impl LogRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static LogRegistry {
        &GLOBAL
    }

    /// Get the cached logger for `name`, creating it on first request.
    ///
    /// A new logger is bound to the global sinks as they are right now.
    /// An empty name resolves to the default logger name.
    pub fn get_logger(&self, name: &str) -> Logger {
        let mut state = self.state.lock();
        let name = resolve_name(&state, name);

        if let Some(logger) = state.loggers.get(&name) {
            return logger.clone();
        }

        let logger = Logger::new(name.clone(), state.global_sinks.clone());
        debug!(logger = %name, sinks = logger.sinks().len(), "created logger");
        state.loggers.insert(name, logger.clone());
        logger
    }

    /// Get the logger registered under the default name.
    pub fn default_logger(&self) -> Logger {
        self.get_logger("")
    }

    /// Create a logger bound to exactly `sinks`, replacing any cached logger
    /// with the same name. Global sinks are not included.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `name` is blank or a sink has an
    /// empty name.
    pub fn logger_with_output(&self, name: &str, sinks: Vec<SharedSink>) -> Result<Logger> {
        if name.trim().is_empty() {
            bail!(Config, "Logger name must not be empty");
        }
        validate_sinks(&sinks)?;

        let logger = Logger::new(name, sinks);
        let replaced = self
            .state
            .lock()
            .loggers
            .insert(name.to_string(), logger.clone())
            .is_some();
        debug!(logger = %name, sinks = logger.sinks().len(), replaced, "bound logger to explicit sinks");
        Ok(logger)
    }

    /// Append sinks to the global list, preserving order and duplicates.
    ///
    /// Only loggers created afterwards see them.
    ///
    /// # Errors
    ///
    /// Returns a configuration error, and registers nothing, if any sink has
    /// an empty name.
    pub fn add_log_sinks<I>(&self, sinks: I) -> Result<()>
    where
        I: IntoIterator<Item = SharedSink>,
    {
        let sinks: Vec<SharedSink> = sinks.into_iter().collect();
        validate_sinks(&sinks)?;

        let mut state = self.state.lock();
        state.global_sinks.extend(sinks);
        debug!(total = state.global_sinks.len(), "registered global log sinks");
        Ok(())
    }

    /// Rebind `name` to the current global sinks and cache the result.
    pub fn refresh_logger(&self, name: &str) -> Logger {
        let mut state = self.state.lock();
        let name = resolve_name(&state, name);
        let logger = Logger::new(name.clone(), state.global_sinks.clone());
        state.loggers.insert(name, logger.clone());
        logger
    }

    /// Snapshot of the global sinks.
    pub fn global_sinks(&self) -> Vec<SharedSink> {
        self.state.lock().global_sinks.clone()
    }

    /// Whether this exact sink instance is registered globally.
    pub fn has_global_sink(&self, sink: &SharedSink) -> bool {
        self.state
            .lock()
            .global_sinks
            .iter()
            .any(|registered| same_sink(registered, sink))
    }

    /// Names of all cached loggers, sorted.
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().loggers.keys().cloned().collect();
        names.sort();
        names
    }

    /// The name [`default_logger`](Self::default_logger) resolves to.
    pub fn default_logger_name(&self) -> String {
        self.state.lock().default_name.clone()
    }

    /// Change the name the default logger resolves to.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `name` is blank.
    pub fn set_default_logger_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            bail!(Config, "Default logger name must not be empty");
        }
        self.state.lock().default_name = name.to_string();
        Ok(())
    }

    /// Drop every global sink and cached logger, and restore the default
    /// logger name.
    pub fn reset(&self) {
        *self.state.lock() = RegistryState::default();
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_name(state: &RegistryState, name: &str) -> String {
    if name.trim().is_empty() {
        state.default_name.clone()
    } else {
        name.to_string()
    }
}

fn validate_sinks(sinks: &[SharedSink]) -> Result<()> {
    for (index, sink) in sinks.iter().enumerate() {
        if sink.name().trim().is_empty() {
            return Err(FanlogError::Config(format!(
                "Sink at position {} has an empty name",
                index
            )));
        }
    }
    Ok(())
}

/// [`LogRegistry::get_logger`] on the global registry.
pub fn get_logger(name: &str) -> Logger {
    LogRegistry::global().get_logger(name)
}

/// [`LogRegistry::logger_with_output`] on the global registry.
pub fn logger_with_output(name: &str, sinks: Vec<SharedSink>) -> Result<Logger> {
    LogRegistry::global().logger_with_output(name, sinks)
}

/// [`LogRegistry::add_log_sinks`] on the global registry.
pub fn add_log_sinks<I>(sinks: I) -> Result<()>
where
    I: IntoIterator<Item = SharedSink>,
{
    LogRegistry::global().add_log_sinks(sinks)
}
