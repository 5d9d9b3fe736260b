use std::fs;

use ethers::types::Address;
use serde::Deserialize;
use wallet::WalletConfig;

use crate::{biz::HashAlgo, error::Error};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// The JSON-RPC endpoint of the node.
    pub rpc_url: String,
    /// The deployed name registry contract.
    pub contract_address: Address,
    /// If set, the node must report this chain id.
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Send pre-EIP-1559 transactions.
    #[serde(default = "default_legacy_tx")]
    pub legacy_tx: bool,
    /// How names are hashed into registry keys.
    #[serde(default)]
    pub name_hash: HashAlgo,
    /// Wallet configuration.
    pub wallet: WalletConfig,
}

fn default_legacy_tx() -> bool {
    true
}

impl Config {
    /// Load the configuration from the given path.
    pub fn load(path: &str) -> Result<Self, Error> {
        let content =
            fs::read_to_string(path).map_err(|_| Error::ConfigNotExist(path.to_string()))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
