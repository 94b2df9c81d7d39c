//! Logger setup for the `entityit` binary and host tools.
//!
//! The library itself only uses the `log` facade.

use crate::config::LoggingConfig;
use anyhow::Result;

/// Install `env_logger` with the configured level as default filter.
///
/// `RUST_LOG` still wins when set. Safe to call more than once.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    config.validate()?;
    let env = env_logger::Env::default().default_filter_or(config.level.to_ascii_lowercase());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .format_module_path(false)
        .try_init();
    Ok(())
}
