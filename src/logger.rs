//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup. Logs go to stderr so they never interleave
//! with command output on stdout.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `level` (e.g. `"info"`, `"moneymate=debug"`)
/// is the fallback.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow!("invalid log level '{level}': {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to set subscriber: {e}"))?;

    Ok(())
}
