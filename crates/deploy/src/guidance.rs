//! Follow-up instructions printed after a successful deployment.

use std::fmt;

use alloy_core::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::ContractArtifact;

/// Placeholder replaced by the deployed address in [`GuidanceConfig::client_snippet`].
pub const ADDRESS_PLACEHOLDER: &str = "{address}";

/// Where the client application expects the deployment outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Client source file holding the contract address constant.
    pub client_file: String,
    /// Line to paste into `client_file`, with `{address}` as placeholder.
    pub client_snippet: String,
    /// Client directory the ABI artifact is copied into.
    pub asset_dir: String,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            client_file: "lib/services/auction_service.dart".to_string(),
            client_snippet: format!("static const String contractAddress = '{ADDRESS_PLACEHOLDER}';"),
            asset_dir: "assets/contracts/".to_string(),
        }
    }
}

/// Rendered next steps for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guidance {
    pub client_file: String,
    /// Address line to paste into the client.
    pub client_line: String,
    /// Command copying the ABI artifact into the client assets.
    pub copy_abi: String,
    /// Verification command. Printed only, never run.
    pub verify: String,
}

impl Guidance {
    pub fn new(
        config: &GuidanceConfig,
        artifact: &ContractArtifact,
        address: &Address,
        network: &str,
    ) -> Self {
        let address = address.to_string();
        Self {
            client_file: config.client_file.clone(),
            client_line: config.client_snippet.replace(ADDRESS_PLACEHOLDER, &address),
            copy_abi: format!("cp {} {}", artifact.path.display(), config.asset_dir),
            verify: format!("npx hardhat verify --network {network} {address}"),
        }
    }
}

impl fmt::Display for Guidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Next steps:")?;
        writeln!(f, "1. Set the contract address in {}:", self.client_file)?;
        writeln!(f, "   {}", self.client_line)?;
        writeln!(f, "2. Copy the ABI into the client assets:")?;
        writeln!(f, "   {}", self.copy_abi)?;
        writeln!(f, "3. Verify the contract (optional):")?;
        write!(f, "   {}", self.verify)
    }
}
