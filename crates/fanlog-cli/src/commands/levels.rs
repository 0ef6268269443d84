//! Show the severity levels.

use anyhow::Result;
use fanlog_core::term::paint;
use fanlog_types::LogLevel;

pub async fn execute(verbose: bool) -> Result<()> {
    for level in LogLevel::ALL {
        let label = paint(level.short_label(), level);
        if verbose {
            println!(
                "{} {} {:<8} {:?}",
                level.rank(),
                label,
                level.name(),
                level.color()
            );
        } else {
            println!("{} {} {}", level.rank(), label, level.name());
        }
    }

    Ok(())
}
