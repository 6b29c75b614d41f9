use std::{fs, path::Path};

use alloy_primitives::Address;
use serde::Deserialize;

/// A single RPC pool member as configured under `eth_nodes`. The first entry
/// in the enclosing `Vec` is the pool's primary; order is preserved from the
/// YAML document.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    pub url:  String
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub dsn: String
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub port: u16
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub realtime_interval: u64,
    pub polling_interval:  u64,
    pub order_interval:    u64,
    pub confirm_blocks:    u64
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub addr:     String,
    pub password: String,
    pub db:       u8
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloorPriceKafkaConfig {
    pub brokers: String,
    pub topic:   String
}

/// Typed form of the deployment's YAML config document, deserialized
/// field-for-field and validated once at startup. There is no global/static
/// instance of this type: callers load it once in `main` and thread it
/// explicitly into every driver.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub eth_nodes:         Vec<NodeConfig>,
    pub database:          DatabaseConfig,
    pub api:               ApiConfig,
    pub nft_contracts:     Vec<String>,
    pub order_contracts:   Vec<String>,
    pub sync:              SyncConfig,
    pub redis:             RedisConfig,
    pub floor_price_kafka: FloorPriceKafkaConfig
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path:   String,
        #[source]
        source: std::io::Error
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path:   String,
        #[source]
        source: serde_yaml::Error
    },
    #[error("eth_nodes must contain at least one endpoint")]
    NoEthNodes,
    #[error("sync.confirm_blocks must be a positive integer, got {0}")]
    NonPositiveConfirmBlocks(u64),
    #[error("{field} entry {value:?} is not a valid 20-byte hex address")]
    InvalidAddress { field: &'static str, value: String }
}

impl Config {
    /// Reads and validates the config file at `path`. Performs no I/O beyond
    /// reading that one file and mutates no process-global state.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_display = path.as_ref().display().to_string();
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source
        })?;
        let config: Config =
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path_display, source })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.eth_nodes.is_empty() {
            return Err(ConfigError::NoEthNodes);
        }
        if self.sync.confirm_blocks == 0 {
            return Err(ConfigError::NonPositiveConfirmBlocks(self.sync.confirm_blocks));
        }
        for value in &self.nft_contracts {
            validate_address("nft_contracts", value)?;
        }
        for value in &self.order_contracts {
            validate_address("order_contracts", value)?;
        }
        Ok(())
    }

    /// `nft_contracts` parsed into addresses, in configured order.
    pub fn nft_contract_addresses(&self) -> Vec<Address> {
        self.nft_contracts
            .iter()
            .map(|s| s.parse().expect("validated at load time"))
            .collect()
    }

    /// `order_contracts` parsed into addresses, in configured order.
    pub fn order_contract_addresses(&self) -> Vec<Address> {
        self.order_contracts
            .iter()
            .map(|s| s.parse().expect("validated at load time"))
            .collect()
    }
}

fn validate_address(field: &'static str, value: &str) -> Result<(), ConfigError> {
    value
        .parse::<Address>()
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidAddress { field, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const VALID: &str = r#"
eth_nodes:
  - name: primary
    url: http://localhost:8545
  - name: fallback
    url: http://localhost:8546
database:
  dsn: postgres://localhost/nftsync
api:
  port: 8080
nft_contracts:
  - "0x000000000000000000000000000000000000aa"
order_contracts:
  - "0x000000000000000000000000000000000000bb"
sync:
  realtime_interval: 5
  polling_interval: 15
  order_interval: 15
  confirm_blocks: 12
redis:
  addr: "127.0.0.1:6379"
  password: ""
  db: 0
floor_price_kafka:
  brokers: "localhost:9092"
  topic: "floor-price-changed"
"#;

    #[test]
    fn loads_a_valid_config() {
        let file = write_config(VALID);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.eth_nodes.len(), 2);
        assert_eq!(config.eth_nodes[0].name, "primary");
        assert_eq!(config.sync.confirm_blocks, 12);
        assert_eq!(config.nft_contract_addresses().len(), 1);
    }

    #[test]
    fn rejects_empty_eth_nodes() {
        let file = write_config(VALID.replacen(
            "eth_nodes:\n  - name: primary\n    url: http://localhost:8545\n  - name: fallback\n    url: http://localhost:8546\n",
            "eth_nodes: []\n",
            1
        ).as_str());
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoEthNodes));
    }

    #[test]
    fn rejects_zero_confirm_blocks() {
        let file = write_config(&VALID.replace("confirm_blocks: 12", "confirm_blocks: 0"));
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveConfirmBlocks(0)));
    }

    #[test]
    fn rejects_invalid_contract_address() {
        let file = write_config(&VALID.replace("0x000000000000000000000000000000000000aa", "not-an-address"));
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress { field: "nft_contracts", .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load("/nonexistent/path/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
