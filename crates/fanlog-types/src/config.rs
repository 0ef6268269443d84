//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::errors::{FanlogError, Result};
use crate::{LogLevel, DEFAULT_LOGGER_NAME};

/// Top-level logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Name of the logger handed out when none is requested
    #[serde(default = "default_logger_name")]
    pub default_logger: String,
    /// Sinks registered globally, in delivery order
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

fn default_logger_name() -> String {
    DEFAULT_LOGGER_NAME.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_logger: default_logger_name(),
            sinks: Vec::new(),
        }
    }
}

impl LoggingConfig {
    /// Check every sink declaration.
    pub fn validate(&self) -> Result<()> {
        if self.default_logger.trim().is_empty() {
            return Err(FanlogError::Config(
                "default_logger must not be empty".to_string(),
            ));
        }
        for (index, sink) in self.sinks.iter().enumerate() {
            sink.validate()
                .map_err(|e| FanlogError::Config(format!("sinks[{}]: {}", index, e)))?;
        }
        Ok(())
    }
}

/// One sink declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SinkConfig {
    /// Terminal output
    Console {
        /// Sink name (defaults to "console")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Minimum level
        #[serde(default)]
        level: LogLevel,
        /// Output format
        #[serde(default)]
        format: LogFormat,
        /// Whether to color level tags
        #[serde(default = "default_colors")]
        colors: bool,
        /// Which stream to write to
        #[serde(default)]
        stream: ConsoleStream,
    },
    /// Append to a file
    File {
        /// Sink name (defaults to "file")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// File path template (supports `~` and strftime substitution)
        path: String,
        /// Minimum level
        #[serde(default)]
        level: LogLevel,
        /// Output format
        #[serde(default = "default_file_format")]
        format: LogFormat,
    },
    /// POST each event as JSON to a remote endpoint
    Http {
        /// Sink name (defaults to "http")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Endpoint URL
        url: String,
        /// Minimum level
        #[serde(default)]
        level: LogLevel,
        /// Request timeout in seconds
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
        /// Extra request headers
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
    },
}

fn default_colors() -> bool {
    true
}

fn default_file_format() -> LogFormat {
    LogFormat::Compact
}

fn default_timeout_secs() -> u64 {
    10
}

impl SinkConfig {
    /// The kind of sink, as written in configuration.
    pub fn kind(&self) -> &'static str {
        match self {
            SinkConfig::Console { .. } => "console",
            SinkConfig::File { .. } => "file",
            SinkConfig::Http { .. } => "http",
        }
    }

    /// The configured name, or the kind when no name was given.
    pub fn name(&self) -> &str {
        let name = match self {
            SinkConfig::Console { name, .. }
            | SinkConfig::File { name, .. }
            | SinkConfig::Http { name, .. } => name.as_deref(),
        };
        name.unwrap_or_else(|| self.kind())
    }

    /// Minimum level of the declared sink.
    pub fn level(&self) -> LogLevel {
        match self {
            SinkConfig::Console { level, .. }
            | SinkConfig::File { level, .. }
            | SinkConfig::Http { level, .. } => *level,
        }
    }

    /// Check the declaration for obviously malformed values.
    pub fn validate(&self) -> Result<()> {
        if self.name().trim().is_empty() {
            return Err(FanlogError::Config("sink name must not be empty".to_string()));
        }
        match self {
            SinkConfig::Console { .. } => Ok(()),
            SinkConfig::File { path, .. } => {
                if path.trim().is_empty() {
                    return Err(FanlogError::Config("file sink requires a path".to_string()));
                }
                Ok(())
            }
            SinkConfig::Http { url, timeout_secs, .. } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(FanlogError::Config(format!(
                        "http sink url must start with http:// or https://, got '{}'",
                        url
                    )));
                }
                if *timeout_secs == 0 {
                    return Err(FanlogError::Config(
                        "http sink timeout_secs must be greater than zero".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Which standard stream a console sink writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error
    Stderr,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sink_list() {
        let yaml = r#"
default_logger: app
sinks:
  - type: console
    level: info
  - type: file
    name: audit
    path: /tmp/audit.log
    level: warning
  - type: http
    url: https://logs.example.com/ingest
    headers:
      authorization: Bearer abc
"#;
        let config: LoggingConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_logger, "app");
        assert_eq!(config.sinks.len(), 3);

        assert_eq!(config.sinks[0].name(), "console");
        assert_eq!(config.sinks[0].level(), LogLevel::Info);
        assert!(matches!(
            config.sinks[0],
            SinkConfig::Console { colors: true, stream: ConsoleStream::Stdout, format: LogFormat::Pretty, .. }
        ));

        assert_eq!(config.sinks[1].name(), "audit");
        assert!(matches!(config.sinks[1], SinkConfig::File { format: LogFormat::Compact, .. }));

        assert_eq!(config.sinks[2].kind(), "http");
        assert_eq!(config.sinks[2].level(), LogLevel::Verbose);
        assert!(matches!(config.sinks[2], SinkConfig::Http { timeout_secs: 10, .. }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed() {
        let bad_url = SinkConfig::Http {
            name: None,
            url: "ftp://example.com".to_string(),
            level: LogLevel::Info,
            timeout_secs: 5,
            headers: BTreeMap::new(),
        };
        assert!(bad_url.validate().is_err());

        let no_path = SinkConfig::File {
            name: Some("audit".to_string()),
            path: " ".to_string(),
            level: LogLevel::Info,
            format: LogFormat::Json,
        };
        assert!(no_path.validate().is_err());

        let config = LoggingConfig {
            default_logger: "app".to_string(),
            sinks: vec![no_path],
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sinks[0]"));
    }
}
