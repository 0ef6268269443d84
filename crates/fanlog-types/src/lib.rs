//! # fanlog Types
//!
//! Core types, traits, and enums shared across all fanlog crates.
//!
//! This crate provides the fundamental building blocks of the logging facade:
//!
//! - The ordered [`LogLevel`] model and its rendering hints
//! - The per-call [`LogEvent`] value and the opaque [`LogError`] payload
//! - The [`LogSink`] capability trait every output destination implements
//! - Configuration data types for declaring sinks
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use fanlog_types::LogLevel;
//!
//! assert!(LogLevel::Error.meets_threshold(LogLevel::Warning));
//! assert!(!LogLevel::Debug.meets_threshold(LogLevel::Info));
//!
//! let level: LogLevel = "warn".parse().unwrap();
//! assert_eq!(level, LogLevel::Warning);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod event;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{FanlogError, Result};
pub use enums::{meets_threshold, LevelColor, LogLevel};
pub use event::{LogError, LogEvent};
pub use traits::{LogSink, SharedSink};
pub use config::{LogFormat, LoggingConfig, SinkConfig, ConsoleStream};

/// Name used for the logger returned when no explicit name is given.
pub const DEFAULT_LOGGER_NAME: &str = "default";
