use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

use crate::ethereum::{TxOptions, DEFAULT_GAS_LIMIT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub networks: HashMap<String, NetworkConfig>,
    pub default_network: String,
    #[serde(default)]
    pub contract: ContractConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub explorer_url: Option<String>,
    #[serde(default)]
    pub gas: GasConfig,
}

/// Gas defaults for a network. All values are in wei except the limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasConfig {
    #[serde(default = "default_gas_limit")]
    pub default_gas_limit: u64,
    pub gas_price: Option<u64>,
    pub max_fee_per_gas: Option<u64>,
    pub max_priority_fee_per_gas: Option<u64>,
}

/// Default target contract and interface. The signing key is never part
/// of the configuration file; it comes from the PRIVATE_KEY environment
/// variable only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractConfig {
    pub address: Option<String>,
    pub abi_path: Option<String>,
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            default_gas_limit: DEFAULT_GAS_LIMIT,
            gas_price: None,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
        }
    }
}

impl GasConfig {
    /// Seed transaction options from the network's configured defaults.
    pub fn tx_options(&self) -> TxOptions {
        TxOptions {
            gas_limit: Some(self.default_gas_limit),
            gas_price: self.gas_price.map(u128::from),
            max_fee_per_gas: self.max_fee_per_gas.map(u128::from),
            max_priority_fee_per_gas: self.max_priority_fee_per_gas.map(u128::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut networks = HashMap::new();

        networks.insert(
            "botanix".to_string(),
            NetworkConfig {
                rpc_url: "https://node.botanixlabs.dev".to_string(),
                chain_id: 3636,
                explorer_url: None,
                gas: GasConfig::default(),
            },
        );

        networks.insert(
            "sepolia".to_string(),
            NetworkConfig {
                rpc_url: "https://eth-sepolia.g.alchemy.com/v2/demo".to_string(),
                chain_id: 11155111,
                explorer_url: Some("https://sepolia.etherscan.io".to_string()),
                gas: GasConfig::default(),
            },
        );

        Self {
            networks,
            default_network: "botanix".to_string(),
            contract: ContractConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path, e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    anyhow!("Failed to create config directory {:?}: {}", parent, e)
                })?;
            }
        }

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {:?}: {}", path, e))?;

        Ok(())
    }

    /// Load configuration with fallback to default
    pub async fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Self {
        let mut config = match path {
            Some(path) => match Self::load_from_file(path).await {
                Ok(config) => {
                    tracing::info!("Loaded configuration from file");
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load config file, using defaults: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        };

        config.apply_env_vars();
        config
    }

    /// Look up a network, falling back to the configured default.
    pub fn network(&self, name: Option<&str>) -> Result<&NetworkConfig> {
        let network_name = name.unwrap_or(&self.default_network);
        self.networks.get(network_name).ok_or_else(|| {
            let available: Vec<&str> = self.networks.keys().map(String::as_str).collect();
            anyhow!(
                "Network '{}' not configured. Available networks: {}",
                network_name,
                available.join(", ")
            )
        })
    }

    /// Apply environment variable overrides. RPC_URL replaces the
    /// default network's endpoint; the signing key stays out of the
    /// config entirely and is read from PRIVATE_KEY by the caller.
    fn apply_env_vars(&mut self) {
        if let Ok(rpc_url) = std::env::var("RPC_URL") {
            if let Some(network_config) = self.networks.get_mut(&self.default_network) {
                tracing::info!("Using RPC_URL environment variable for network '{}'", self.default_network);
                network_config.rpc_url = rpc_url;
            }
        }
    }

    /// Get default config file path
    pub fn default_config_path() -> Result<std::path::PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("vessel-liquidator").join("config.toml"))
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let sample_config = r#"# Vessel liquidator configuration file
# The signing key is NEVER read from this file. Export PRIVATE_KEY in the
# environment (or a local .env file kept out of version control).

# Default network to use when none is specified
default_network = "botanix"

# Network configurations
[networks.botanix]
rpc_url = "https://node.botanixlabs.dev"
chain_id = 3636

[networks.botanix.gas]
default_gas_limit = 15_000_000
# max_fee_per_gas = 8148           # wei
# max_priority_fee_per_gas = 8148  # wei

[networks.sepolia]
rpc_url = "https://eth-sepolia.g.alchemy.com/v2/YOUR_API_KEY_HERE"
chain_id = 11155111
explorer_url = "https://sepolia.etherscan.io"

[networks.sepolia.gas]
default_gas_limit = 3_000_000

# Default target contract (overridable with --contract / --abi)
[contract]
address = "0xd4B76b6e5E56F1DAD86c96D275831dEfdB9473c1"
# abi_path = "/path/to/liquidation-abi.json"

# Environment variables:
# PRIVATE_KEY - signing key for the liquidation transaction (required)
# RPC_URL     - overrides the default network's RPC endpoint
"#;
        sample_config.to_string()
    }
}
