//! # Node Runtime Library
//!
//! Hosts every Treasury-Chain keeper in one process. The main entry point is
//! the `main.rs` binary; this library exposes the pieces for testing.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and the keeper container
//! - `adapters/` - storage backend selection
//! - `genesis/` - combined genesis document
//! - `logging` - tracing subscriber bootstrap
//! - `runtime` - startup and shutdown sequence

pub mod adapters;
pub mod container;
pub mod genesis;
pub mod logging;
pub mod runtime;

pub use container::{ContainerError, KeeperContainer, RuntimeConfig};
pub use genesis::AppGenesis;
pub use runtime::NodeRuntime;
