//! # Runtime Configuration
//!
//! Everything the runtime reads at startup. Defaults give an in-memory node
//! with the standard quorum (2 approvals, score 80) and `0x` + 20-byte
//! addresses.
//!
//! ## Environment
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TC_DATA_DIR` | `storage.data_dir` (unset = in-memory) |
//! | `TC_MIN_APPROVALS` | `quorum.min_approvals` |
//! | `TC_MIN_SCORE` | `quorum.min_score` |
//! | `TC_ADDRESS_PREFIX` | `addresses.prefix` |
//! | `TC_ADDRESS_BYTES` | `addresses.byte_len` |
//! | `TC_LOG_LEVEL` / `RUST_LOG` | `log.level` |
//! | `TC_GENESIS_FILE` | `genesis_path` |
//! | `TC_EXPORT_FILE` | `export_path` |

use shared_types::HexAddressCodec;
use std::path::PathBuf;
use std::str::FromStr;
use tc_03_approval_quorum::QuorumConfig;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub storage: StorageConfig,
    pub quorum: QuorumConfig,
    pub addresses: AddressConfig,
    pub log: LogConfig,
    /// Genesis file imported when the stores are empty.
    pub genesis_path: Option<PathBuf>,
    /// Where the full state is written on shutdown.
    pub export_path: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Defaults overridden by `TC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("TC_DATA_DIR") {
            config.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = lookup("TC_MIN_APPROVALS") {
            config.quorum.min_approvals = parse_var("TC_MIN_APPROVALS", &value)?;
        }
        if let Some(value) = lookup("TC_MIN_SCORE") {
            config.quorum.min_score = parse_var("TC_MIN_SCORE", &value)?;
        }
        if let Some(prefix) = lookup("TC_ADDRESS_PREFIX") {
            config.addresses.prefix = prefix;
        }
        if let Some(value) = lookup("TC_ADDRESS_BYTES") {
            config.addresses.byte_len = parse_var("TC_ADDRESS_BYTES", &value)?;
        }
        if let Some(level) = lookup("TC_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log.level = level;
        }
        if let Some(path) = lookup("TC_GENESIS_FILE") {
            config.genesis_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("TC_EXPORT_FILE") {
            config.export_path = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = Some(dir.into());
        self
    }

    pub fn with_quorum(mut self, quorum: QuorumConfig) -> Self {
        self.quorum = quorum;
        self
    }

    pub fn with_genesis(mut self, path: impl Into<PathBuf>) -> Self {
        self.genesis_path = Some(path.into());
        self
    }

    pub fn with_export(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = Some(path.into());
        self
    }

    /// The same configuration without a data directory.
    pub fn in_memory(&self) -> Self {
        Self {
            storage: StorageConfig::default(),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.quorum.validate().map_err(ConfigError::InvalidQuorum)?;
        if self.addresses.byte_len == 0 {
            return Err(ConfigError::InvalidAddressLength);
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::EmptyLogLevel);
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidVariable {
        var,
        value: value.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid quorum configuration: {0}")]
    InvalidQuorum(String),

    #[error("address byte length must be greater than zero")]
    InvalidAddressLength,

    #[error("log level must not be empty")]
    EmptyLogLevel,

    #[error("cannot parse {var}={value:?}")]
    InvalidVariable { var: &'static str, value: String },
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// One store file per record kind lives here. `None` keeps everything
    /// in memory.
    pub data_dir: Option<PathBuf>,
}

/// Address format accepted by every keeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressConfig {
    pub prefix: String,
    pub byte_len: usize,
}

impl Default for AddressConfig {
    fn default() -> Self {
        let codec = HexAddressCodec::default();
        Self {
            prefix: codec.prefix().to_string(),
            byte_len: codec.byte_len(),
        }
    }
}

impl AddressConfig {
    pub fn codec(&self) -> HexAddressCodec {
        HexAddressCodec::new(self.prefix.clone(), self.byte_len)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `tc_07_disbursement_tracker=debug`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.quorum.min_approvals, 2);
        assert_eq!(config.quorum.min_score, 80);
        assert_eq!(config.addresses.prefix, "0x");
        assert_eq!(config.addresses.byte_len, 20);
        assert_eq!(config.log.level, "info");
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("TC_DATA_DIR", "/var/lib/tc"),
            ("TC_MIN_APPROVALS", "3"),
            ("TC_MIN_SCORE", " 90 "),
            ("TC_ADDRESS_BYTES", "32"),
            ("RUST_LOG", "debug"),
            ("TC_GENESIS_FILE", "genesis.json"),
        ]))
        .unwrap();

        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/var/lib/tc")));
        assert_eq!(config.quorum, QuorumConfig::default().with_min_approvals(3).with_min_score(90));
        assert_eq!(config.addresses.byte_len, 32);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.genesis_path, Some(PathBuf::from("genesis.json")));
    }

    #[test]
    fn test_tc_log_level_wins_over_rust_log() {
        let config =
            RuntimeConfig::from_lookup(lookup(&[("RUST_LOG", "debug"), ("TC_LOG_LEVEL", "warn")]))
                .unwrap();
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            RuntimeConfig::from_lookup(lookup(&[("TC_MIN_APPROVALS", "two")])),
            Err(ConfigError::InvalidVariable { var: "TC_MIN_APPROVALS", .. })
        ));
        assert!(matches!(
            RuntimeConfig::from_lookup(lookup(&[("TC_MIN_APPROVALS", "0")])),
            Err(ConfigError::InvalidQuorum(_))
        ));
        assert!(matches!(
            RuntimeConfig::from_lookup(lookup(&[("TC_MIN_SCORE", "101")])),
            Err(ConfigError::InvalidQuorum(_))
        ));
        assert_eq!(
            RuntimeConfig::from_lookup(lookup(&[("TC_ADDRESS_BYTES", "0")])),
            Err(ConfigError::InvalidAddressLength)
        );
    }
}
