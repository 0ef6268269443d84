//! # fanlog Sinks
//!
//! Concrete [`LogSink`](fanlog_types::LogSink) implementations:
//! - **Console**: rendered lines to stdout, stderr, or any writer
//! - **File**: rendered lines appended to a file
//! - **HTTP**: each event POSTed as JSON to a remote endpoint
//! - **Memory**: events captured in-process for inspection
//!
//! [`build_sinks`] and [`install`] turn a
//! [`LoggingConfig`](fanlog_types::LoggingConfig) into registered sinks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod console;
pub mod file;
pub mod http;
pub mod memory;

pub use builder::{build_sink, build_sinks, install};
pub use console::ConsoleSink;
pub use file::FileSink;
pub use http::{HttpPayload, HttpSink};
pub use memory::MemorySink;
