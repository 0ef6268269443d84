//! Emit a single event.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use fanlog_core::config::Config;
use fanlog_core::LogRegistry;
use fanlog_sinks::{install, ConsoleSink};
use fanlog_types::{LogError, LogLevel, SharedSink};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub async fn execute(
    message: &str,
    config_path: Option<&Path>,
    logger: Option<&str>,
    level: LogLevel,
    error: Option<&str>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("Configuration file not found: {}", path.display());
            }
            Config::load(path)?
        }
        None => Config::new(),
    };
    let logging = config
        .with_env_overrides("FANLOG")
        .logging()
        .context("Invalid logging configuration")?;

    let registry = LogRegistry::global();
    let sinks = install(registry, &logging)?;
    if sinks.is_empty() {
        debug!("no sinks configured, writing to stdout");
        let console: SharedSink = Arc::new(ConsoleSink::stdout());
        registry.add_log_sinks([console])?;
    }

    let logger = registry.get_logger(logger.unwrap_or(""));
    let report = logger
        .log(level, message, error.map(LogError::msg), None)
        .completion()
        .await;

    for failure in &report.failures {
        eprintln!(
            "{} sink '{}' failed: {}",
            "✗".red(),
            failure.sink.bold(),
            failure.error
        );
    }

    if !report.is_success() {
        bail!(
            "{} of {} sinks failed to deliver",
            report.failures.len(),
            report.attempted()
        );
    }

    Ok(())
}
