//! # Treasury-Chain Node Runtime
//!
//! Loads configuration from `TC_*` environment variables, installs logging,
//! opens the keepers and runs the startup sequence. The process exits after
//! startup and the optional export; embedding applications drive the keepers
//! through the `node_runtime` library.

use anyhow::{Context, Result};
use node_runtime::logging::init_tracing;
use node_runtime::{NodeRuntime, RuntimeConfig};

fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log)?;

    let mut runtime = NodeRuntime::new(config)?;
    runtime.start()?;
    runtime.shutdown()?;

    Ok(())
}
