//! Chain id to block explorer mapping.

use alloy_core::primitives::Address;
use derive_more::Deref;
use serde::{Deserialize, Serialize};

use crate::{NetworkProfile, SEI_MAINNET_CHAIN_ID, SEI_TESTNET_CHAIN_ID};

/// Explorer registered for a single chain id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExplorerEntry {
    pub chain_id: u64,
    pub base_url: String,
}

impl ExplorerEntry {
    pub fn new(chain_id: u64, base_url: impl Into<String>) -> Self {
        Self {
            chain_id,
            base_url: base_url.into(),
        }
    }
}

/// Ordered table of explorers. The first entry for a chain id wins.
///
/// Chains without an entry have no explorer link, which is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct ExplorerTable(Vec<ExplorerEntry>);

impl ExplorerTable {
    pub fn new(entries: Vec<ExplorerEntry>) -> Self {
        Self(entries)
    }

    /// Seistream for the testnet, Seitrace for the mainnet.
    pub fn sei() -> Self {
        Self(vec![
            ExplorerEntry::new(SEI_TESTNET_CHAIN_ID, "https://seistream.app"),
            ExplorerEntry::new(SEI_MAINNET_CHAIN_ID, "https://seitrace.com"),
        ])
    }

    /// Build the table from network profiles, keeping their order.
    pub fn from_profiles<'a>(profiles: impl IntoIterator<Item = &'a NetworkProfile>) -> Self {
        Self(
            profiles
                .into_iter()
                .filter_map(|profile| {
                    profile
                        .explorer_url
                        .as_ref()
                        .map(|url| ExplorerEntry::new(profile.chain_id, url.clone()))
                })
                .collect(),
        )
    }

    /// Add an entry at the end of the table.
    pub fn with_entry(mut self, entry: ExplorerEntry) -> Self {
        self.0.push(entry);
        self
    }

    pub fn base_url(&self, chain_id: u64) -> Option<&str> {
        self.0
            .iter()
            .find(|entry| entry.chain_id == chain_id)
            .map(|entry| entry.base_url.as_str())
    }

    /// `<base>/address/<address>` for the chain, with the address in checksum form.
    pub fn address_url(&self, chain_id: u64, address: &Address) -> Option<String> {
        self.base_url(chain_id)
            .map(|base| format!("{}/address/{}", base.trim_end_matches('/'), address))
    }
}
