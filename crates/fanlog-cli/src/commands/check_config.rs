//! Validate a configuration file.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use fanlog_core::config::Config;
use std::path::Path;

pub async fn execute(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Configuration file not found: {}", path.display());
    }

    let logging = Config::load(path)?
        .with_env_overrides("FANLOG")
        .logging()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    println!("{} {}", "✓".green(), path.display());
    println!("  default logger: {}", logging.default_logger.cyan());

    if logging.sinks.is_empty() {
        println!("  no sinks (events go nowhere)");
    }
    for sink in &logging.sinks {
        println!(
            "  - {} ({}, level >= {})",
            sink.name().bold(),
            sink.kind(),
            sink.level()
        );
    }

    Ok(())
}
