//! Diagnostics for fanlog itself.
//!
//! Sink failures and configuration loading are reported through `tracing`.
//! Applications that already install a subscriber get them for free; the
//! helpers here install a stderr subscriber for those that don't.

use fanlog_types::{FanlogError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the diagnostics filter directive.
pub const FILTER_ENV: &str = "FANLOG_DIAGNOSTICS";

/// Filter used when [`FILTER_ENV`] is unset.
pub const DEFAULT_FILTER: &str = "fanlog=warn";

/// Install a stderr subscriber filtered by [`FILTER_ENV`], falling back to
/// [`DEFAULT_FILTER`].
pub fn init_default() -> Result<()> {
    let filter = EnvFilter::try_from_env(FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter)
}

/// Install a stderr subscriber with an explicit filter directive.
pub fn init_with_filter(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| FanlogError::Config(format!("Invalid diagnostics filter '{}': {}", directive, e)))?;
    install(filter)
}

fn install(filter: EnvFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| FanlogError::Other(format!("Diagnostics already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_directive() {
        let err = init_with_filter("fanlog=notalevel").unwrap_err();
        assert!(err.is_configuration());
    }
}
