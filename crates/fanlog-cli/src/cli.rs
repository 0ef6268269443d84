//! CLI structure and command definitions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use fanlog_types::LogLevel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fanlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Emit log events through configured sinks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show fanlog's own informational diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show fanlog's own debug diagnostics
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only show fanlog's own errors
    #[arg(short, long, global = true, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit one event and wait for every sink
    Emit {
        /// Message to log
        message: String,

        /// Logging configuration file (YAML)
        #[arg(short, long, env = "FANLOG_CONFIG")]
        config: Option<PathBuf>,

        /// Logger name, used as the event source
        #[arg(short, long)]
        logger: Option<String>,

        /// Severity
        #[arg(short = 'L', long, default_value = "info")]
        level: LogLevel,

        /// Attach an error with this text
        #[arg(short, long)]
        error: Option<String>,
    },

    /// List severity levels in order
    Levels,

    /// Validate a logging configuration file
    #[command(name = "check-config")]
    CheckConfig {
        /// Configuration file
        path: PathBuf,
    },
}

impl Cli {
    /// Diagnostics filter chosen by the verbosity flags, if any.
    pub fn diagnostics_filter(&self) -> Option<&'static str> {
        if self.debug {
            Some("fanlog=debug")
        } else if self.verbose {
            Some("fanlog=info")
        } else if self.quiet {
            Some("fanlog=error")
        } else {
            None
        }
    }

    pub async fn execute(&self) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Commands::Emit {
                message,
                config,
                logger,
                level,
                error,
            } => {
                emit::execute(
                    message,
                    config.as_deref(),
                    logger.as_deref(),
                    *level,
                    error.as_deref(),
                )
                .await
            }
            Commands::Levels => levels::execute(self.verbose).await,
            Commands::CheckConfig { path } => check_config::execute(path).await,
        }
    }
}
