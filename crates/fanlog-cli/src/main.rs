//! fanlog CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(&cli);

    match cli.execute().await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(cli: &Cli) {
    use fanlog_core::diagnostics;

    let outcome = match cli.diagnostics_filter() {
        Some(directive) => diagnostics::init_with_filter(directive),
        None => diagnostics::init_default(),
    };
    if let Err(e) = outcome {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }
}
