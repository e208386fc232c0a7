//! Tracing bootstrap.

use crate::container::LogConfig;
use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Build the filter for `config.level`.
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(config.level.trim())
        .with_context(|| format!("Invalid log filter {:?}", config.level))
}

/// Install the global `fmt` subscriber. Call once per process.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(config)?)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;
    Ok(())
}
