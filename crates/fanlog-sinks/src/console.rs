//! Console sink.

use async_trait::async_trait;
use fanlog_core::format::render;
use fanlog_core::term::{in_controlling_terminal, stderr_is_terminal};
use fanlog_types::{ConsoleStream, LogEvent, LogFormat, LogLevel, LogSink, Result};
use parking_lot::Mutex;
use std::io::{self, Write};

enum Output {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

/// Writes one rendered line per event to a terminal stream or writer.
///
/// Writes go through a lock, so lines from concurrent deliveries never
/// interleave.
pub struct ConsoleSink {
    name: String,
    minimum_level: LogLevel,
    format: LogFormat,
    colors: bool,
    output: Mutex<Output>,
}

impl ConsoleSink {
    /// Pretty output on stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        Self::with_output(Output::Stdout, in_controlling_terminal())
    }

    /// Pretty output on stderr, colored when stderr is a terminal.
    pub fn stderr() -> Self {
        Self::with_output(Output::Stderr, stderr_is_terminal())
    }

    /// Write to the given stream.
    pub fn stream(stream: ConsoleStream) -> Self {
        match stream {
            ConsoleStream::Stdout => Self::stdout(),
            ConsoleStream::Stderr => Self::stderr(),
        }
    }

    /// Uncolored output to an arbitrary writer.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self::with_output(Output::Writer(Box::new(writer)), false)
    }

    fn with_output(output: Output, colors: bool) -> Self {
        Self {
            name: "console".to_string(),
            minimum_level: LogLevel::Verbose,
            format: LogFormat::Pretty,
            colors,
            output: Mutex::new(output),
        }
    }

    /// Set the sink name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Ignore events below `level`.
    pub fn with_minimum_level(mut self, level: LogLevel) -> Self {
        self.minimum_level = level;
        self
    }

    /// Set the line format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Force colors on or off.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }
}

#[async_trait]
impl LogSink for ConsoleSink {
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

        let line = render(event, self.format, self.colors);
        let mut output = self.output.lock();
        match &mut *output {
            Output::Stdout => {
                let mut handle = io::stdout().lock();
                writeln!(handle, "{}", line)?;
                handle.flush()?;
            }
            Output::Stderr => {
                let mut handle = io::stderr().lock();
                writeln!(handle, "{}", line)?;
            }
            Output::Writer(writer) => {
                writeln!(writer, "{}", line)?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}
