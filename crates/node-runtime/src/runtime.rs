//! # Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Validate configuration and open every keeper store
//! 2. Import the genesis file if one is configured and the stores are empty
//! 3. Verify disbursed totals against the disbursement records
//!
//! On shutdown the full state is exported if an export path is configured.

use crate::container::{KeeperContainer, RuntimeConfig};
use crate::genesis::AppGenesis;
use anyhow::{Context, Result};
use tracing::info;

pub struct NodeRuntime {
    container: KeeperContainer,
}

impl NodeRuntime {
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        info!("Creating Treasury-Chain node runtime");
        let container = KeeperContainer::new(config).context("Failed to initialize keepers")?;
        Ok(Self { container })
    }

    pub fn start(&mut self) -> Result<()> {
        info!("===========================================");
        info!("  Treasury-Chain Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        self.initialize_genesis()?;
        self.container
            .verify()
            .context("Disbursed totals disagree with disbursement records")?;

        let config = self.container.config();
        info!("Data Dir: {:?}", config.storage.data_dir);
        info!(
            "Quorum: {} approvals, min score {}",
            config.quorum.min_approvals, config.quorum.min_score
        );
        Ok(())
    }

    fn initialize_genesis(&mut self) -> Result<()> {
        let Some(path) = self.container.config().genesis_path.clone() else {
            return Ok(());
        };

        if !self.container.is_empty()? {
            info!("Stores already populated, skipping genesis {}", path.display());
            return Ok(());
        }

        info!("Importing genesis from {}", path.display());
        let genesis = AppGenesis::load(&path)?;
        self.container
            .import_genesis(genesis)
            .with_context(|| format!("Failed to import genesis {}", path.display()))?;
        Ok(())
    }

    /// Export state if configured.
    pub fn shutdown(&self) -> Result<()> {
        if let Some(path) = &self.container.config().export_path {
            let genesis = self.container.export_genesis()?;
            genesis.save(path)?;
            info!(
                "Exported {} records to {}",
                genesis.record_count(),
                path.display()
            );
        }
        info!("Node runtime stopped");
        Ok(())
    }

    pub fn container(&self) -> &KeeperContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut KeeperContainer {
        &mut self.container
    }
}
