//! # Genesis Module
//!
//! Combined genesis document and its file format. Importing and exporting
//! against live keepers is done by `KeeperContainer`.

pub mod state;

pub use state::{AppGenesis, GenesisFileError};
