//! File sink.

use async_trait::async_trait;
use fanlog_core::format::render;
use fanlog_types::{FanlogError, LogEvent, LogFormat, LogLevel, LogSink, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Appends one rendered line per event to a single file.
///
/// The file is never rotated. Writes run on the blocking thread pool.
pub struct FileSink {
    name: String,
    minimum_level: LogLevel,
    format: LogFormat,
    path: PathBuf,
    writer: Arc<Mutex<RollingFileAppender>>,
}

impl FileSink {
    /// Open `path` for appending, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| FanlogError::Config(format!("Log path '{}' has no file name", path.display())))?
            .to_string_lossy()
            .into_owned();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        std::fs::create_dir_all(&dir)?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file_name)
            .build(&dir)
            .map_err(|e| FanlogError::Config(format!("Cannot open log file '{}': {}", path.display(), e)))?;

        Ok(Self {
            name: "file".to_string(),
            minimum_level: LogLevel::Verbose,
            format: LogFormat::Compact,
            path: path.to_path_buf(),
            writer: Arc::new(Mutex::new(appender)),
        })
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

    /// The file being appended to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LogSink for FileSink {
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

        let mut line = render(event, self.format, false);
        line.push('\n');
        let writer = Arc::clone(&self.writer);

        // Without a runtime there is no blocking pool to hand the write to
        if Handle::try_current().is_err() {
            return write_line(&writer, &line);
        }

        tokio::task::spawn_blocking(move || write_line(&writer, &line))
            .await
            .map_err(|e| FanlogError::delivery(self.name.clone(), format!("write task failed: {}", e)))?
    }
}

fn write_line(writer: &Mutex<RollingFileAppender>, line: &str) -> Result<()> {
    let mut guard = writer.lock();
    guard.write_all(line.as_bytes())?;
    guard.flush()?;
    Ok(())
}
