//! Network identity and the static per-network configuration.

use serde::{Deserialize, Serialize};

/// Chain id of the Sei EVM testnet (atlantic-2).
pub const SEI_TESTNET_CHAIN_ID: u64 = 1328;
/// Chain id of the Sei EVM mainnet (pacific-1).
pub const SEI_MAINNET_CHAIN_ID: u64 = 1329;

/// Network a provider is connected to, as reported after connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{name} (chain id {chain_id})")]
pub struct NetworkDescriptor {
    pub name: String,
    pub chain_id: u64,
}

/// Static configuration for one deployable network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Name used for record files and the verification hint (e.g. `seiTestnet`).
    pub name: String,
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Chain id the endpoint is expected to report.
    pub chain_id: u64,
    /// Base URL of the block explorer, if the network has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    /// Symbol of the native currency, used when reporting balances.
    pub currency: String,
}

impl NetworkProfile {
    /// Sei EVM testnet.
    pub fn sei_testnet() -> Self {
        Self {
            name: "seiTestnet".to_string(),
            rpc_url: "https://evm-rpc-testnet.sei-apis.com".to_string(),
            chain_id: SEI_TESTNET_CHAIN_ID,
            explorer_url: Some("https://seistream.app".to_string()),
            currency: "SEI".to_string(),
        }
    }

    /// Sei EVM mainnet.
    pub fn sei_mainnet() -> Self {
        Self {
            name: "seiMainnet".to_string(),
            rpc_url: "https://evm-rpc.sei-apis.com".to_string(),
            chain_id: SEI_MAINNET_CHAIN_ID,
            explorer_url: Some("https://seitrace.com".to_string()),
            currency: "SEI".to_string(),
        }
    }

    /// The built-in profiles, testnet first.
    pub fn defaults() -> Vec<Self> {
        vec![Self::sei_testnet(), Self::sei_mainnet()]
    }

    pub fn descriptor(&self) -> NetworkDescriptor {
        NetworkDescriptor {
            name: self.name.clone(),
            chain_id: self.chain_id,
        }
    }
}
