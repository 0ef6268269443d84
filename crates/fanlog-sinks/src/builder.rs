//! Turning sink declarations into live sinks.

use crate::{ConsoleSink, FileSink, HttpSink};
use chrono::Local;
use fanlog_core::time::expand_template;
use fanlog_core::util::fs::expand_path;
use fanlog_core::LogRegistry;
use fanlog_types::{LoggingConfig, Result, SharedSink, SinkConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Build one sink from its declaration.
///
/// File paths get `~` expanded and strftime patterns filled with the current
/// local time.
pub fn build_sink(config: &SinkConfig) -> Result<SharedSink> {
    config.validate()?;

    let sink: SharedSink = match config {
        SinkConfig::Console {
            level,
            format,
            colors,
            stream,
            ..
        } => {
            let mut sink = ConsoleSink::stream(*stream)
                .named(config.name())
                .with_minimum_level(*level)
                .with_format(*format);
            if !colors {
                sink = sink.with_colors(false);
            }
            Arc::new(sink)
        }
        SinkConfig::File {
            path,
            level,
            format,
            ..
        } => {
            let path = expand_path(expand_template(path, Local::now())?);
            Arc::new(
                FileSink::open(&path)?
                    .named(config.name())
                    .with_minimum_level(*level)
                    .with_format(*format),
            )
        }
        SinkConfig::Http {
            url,
            level,
            timeout_secs,
            headers,
            ..
        } => {
            let mut sink = HttpSink::new(url)?
                .named(config.name())
                .with_minimum_level(*level)
                .with_timeout(Duration::from_secs(*timeout_secs));
            for (name, value) in headers {
                sink = sink.with_header(name, value)?;
            }
            Arc::new(sink)
        }
    };

    debug!(sink = config.name(), kind = config.kind(), level = %config.level(), "built log sink");
    Ok(sink)
}

/// Build every declared sink, in order. Fails on the first bad declaration.
pub fn build_sinks(config: &LoggingConfig) -> Result<Vec<SharedSink>> {
    config.validate()?;
    config.sinks.iter().map(build_sink).collect()
}

/// Build the configured sinks and register them with `registry`.
///
/// Also sets the registry's default logger name. Nothing is registered when
/// any sink fails to build.
pub fn install(registry: &LogRegistry, config: &LoggingConfig) -> Result<Vec<SharedSink>> {
    let sinks = build_sinks(config)?;
    registry.set_default_logger_name(&config.default_logger)?;
    registry.add_log_sinks(sinks.iter().cloned())?;
    info!(
        default_logger = %config.default_logger,
        sinks = sinks.len(),
        "installed logging configuration"
    );
    Ok(sinks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_types::{ConsoleStream, LogFormat, LogLevel, LogSink};
    use std::collections::BTreeMap;

    fn yaml(config: &str) -> LoggingConfig {
        serde_yaml::from_str(config).unwrap()
    }

    #[test]
    fn test_build_console_defaults_name_to_kind() {
        let sink = build_sink(&SinkConfig::Console {
            name: None,
            level: LogLevel::Warning,
            format: LogFormat::Compact,
            colors: false,
            stream: ConsoleStream::Stderr,
        })
        .unwrap();

        assert_eq!(sink.name(), "console");
        assert_eq!(sink.minimum_level(), LogLevel::Warning);
        assert!(!sink.accepts(LogLevel::Info));
    }

    #[test]
    fn test_build_http_with_headers() {
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), "Bearer t".to_string());
        let sink = build_sink(&SinkConfig::Http {
            name: Some("remote".to_string()),
            url: "https://logs.example.com/ingest".to_string(),
            level: LogLevel::Error,
            timeout_secs: 5,
            headers,
        })
        .unwrap();

        assert_eq!(sink.name(), "remote");
        assert_eq!(sink.minimum_level(), LogLevel::Error);

        let bad = SinkConfig::Http {
            name: None,
            url: "https://logs.example.com".to_string(),
            level: LogLevel::Info,
            timeout_secs: 0,
            headers: BTreeMap::new(),
        };
        assert!(build_sink(&bad).err().unwrap().is_configuration());
    }

    #[tokio::test]
    async fn test_build_file_expands_template() {
        let dir = tempfile::tempdir().unwrap();
        let template = format!("{}/app-%Y.log", dir.path().display());
        let sink = build_sink(&SinkConfig::File {
            name: Some("audit".to_string()),
            path: template,
            level: LogLevel::Verbose,
            format: LogFormat::Compact,
        })
        .unwrap();

        sink.deliver(&fanlog_types::LogEvent::new(LogLevel::Info, "hi", "App"))
            .await
            .unwrap();

        let expected = dir
            .path()
            .join(format!("app-{}.log", Local::now().format("%Y")));
        assert!(std::fs::read_to_string(expected).unwrap().contains("hi"));
    }

    #[test]
    fn test_install_registers_sinks_and_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = yaml(&format!(
            "default_logger: worker\nsinks:\n  - type: console\n    colors: false\n  - type: file\n    name: audit\n    path: {}/audit.log\n",
            dir.path().display()
        ));

        let registry = LogRegistry::new();
        let sinks = install(&registry, &config).unwrap();

        assert_eq!(sinks.len(), 2);
        assert_eq!(registry.default_logger_name(), "worker");
        let logger = registry.default_logger();
        assert_eq!(logger.name(), "worker");
        assert_eq!(logger.sink_names(), vec!["console", "audit"]);
    }

    #[test]
    fn test_install_is_all_or_nothing() {
        let config = yaml(
            "sinks:\n  - type: console\n  - type: http\n    url: ftp://nope\n",
        );

        let registry = LogRegistry::new();
        assert!(install(&registry, &config).is_err());
        assert!(registry.global_sinks().is_empty());
        assert_eq!(registry.default_logger_name(), "default");
    }
}
