//! # Keeper Container
//!
//! Runtime configuration and the container that owns every keeper.

pub mod config;
pub mod keepers;

pub use config::{AddressConfig, ConfigError, LogConfig, RuntimeConfig, StorageConfig};
pub use keepers::{ContainerError, ContainerResult, KeeperContainer};
