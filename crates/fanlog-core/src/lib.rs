//! # fanlog Core
//!
//! Named loggers, fan-out dispatch to sinks, and the logger registry.
//!
//! This crate provides:
//!
//! - **Loggers**: one method per severity, stamping each event and handing it
//!   to every bound sink in its own task
//! - **Dispatch**: fire-and-forget delivery with per-sink failure isolation and
//!   an awaitable completion report for flush-before-exit
//! - **Registry**: cached named loggers bound to a snapshot of the global sinks
//! - **Configuration**: layered YAML configuration with environment overrides
//! - **Rendering**: pretty, compact, and JSON line formats for sinks
//! - **Diagnostics**: `tracing` subscriber setup for fanlog's own warnings
//!
//! ## Example
//!
//! ```no_run
//! use fanlog_core::LogRegistry;
//!
//! # async fn demo(console: fanlog_types::SharedSink) {
//! let registry = LogRegistry::new();
//! registry.add_log_sinks([console]).unwrap();
//!
//! let log = registry.get_logger("App");
//! log.info("started");
//!
//! // Wait for every sink before exiting
//! let report = log.error("shutting down").completion().await;
//! assert!(report.is_success());
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod format;
pub mod logger;
pub mod registry;
pub mod term;
pub mod time;
pub mod util;

// Re-export commonly used items
pub use config::Config;
pub use dispatch::{Dispatch, DispatchReport, SinkFailure};
pub use logger::Logger;
pub use registry::{add_log_sinks, get_logger, logger_with_output, LogRegistry};
pub use fanlog_types::{
    FanlogError, LogError, LogEvent, LogFormat, LogLevel, LogSink, LoggingConfig, Result,
    SharedSink, SinkConfig,
};

/// fanlog version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name, used as the diagnostics target prefix
pub const APP_NAME: &str = "fanlog";
