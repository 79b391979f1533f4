//! Builder module for creating a [`Deployer`].

use std::path::PathBuf;

use crate::{
    Clock, DeployProvider, Deployer, ExplorerTable, GuidanceConfig, RecordStore, SeishipConfig,
    SystemClock,
};

/// Builder for creating a [`Deployer`].
///
/// # Example
///
/// ```no_run
/// use seiship_deploy::{ArtifactStore, DeployerBuilder, NetworkProfile, RpcProvider};
///
/// # async fn example() -> anyhow::Result<()> {
/// let provider =
///     RpcProvider::connect(NetworkProfile::sei_testnet(), None, ArtifactStore::new("artifacts"))
///         .await?;
/// let deployer = DeployerBuilder::new("AuctionMarketplace")
///     .records_dir("deployments")
///     .build(provider);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeployerBuilder<C = SystemClock> {
    contract: String,
    explorers: ExplorerTable,
    records_dir: PathBuf,
    guidance: GuidanceConfig,
    clock: C,
}

impl DeployerBuilder<SystemClock> {
    /// Deploy `contract` with the Sei explorers, writing records to the working directory.
    pub fn new(contract: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            explorers: ExplorerTable::sei(),
            records_dir: PathBuf::from("."),
            guidance: GuidanceConfig::default(),
            clock: SystemClock,
        }
    }

    pub fn from_config(config: &SeishipConfig) -> Self {
        Self::new(config.contract.clone())
            .explorers(config.explorers())
            .records_dir(config.records_dir.clone())
            .guidance(config.guidance.clone())
    }
}

impl<C: Clock> DeployerBuilder<C> {
    pub fn explorers(mut self, explorers: ExplorerTable) -> Self {
        self.explorers = explorers;
        self
    }

    pub fn records_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.records_dir = dir.into();
        self
    }

    pub fn guidance(mut self, guidance: GuidanceConfig) -> Self {
        self.guidance = guidance;
        self
    }

    /// Replace the clock that timestamps the record.
    pub fn clock<C2: Clock>(self, clock: C2) -> DeployerBuilder<C2> {
        DeployerBuilder {
            contract: self.contract,
            explorers: self.explorers,
            records_dir: self.records_dir,
            guidance: self.guidance,
            clock,
        }
    }

    pub fn build<P: DeployProvider>(self, provider: P) -> Deployer<P, C> {
        tracing::debug!(
            contract = %self.contract,
            records_dir = %self.records_dir.display(),
            explorers = self.explorers.len(),
            "Deployer configured"
        );

        Deployer {
            provider,
            contract: self.contract,
            explorers: self.explorers,
            records: RecordStore::new(self.records_dir),
            guidance: self.guidance,
            clock: self.clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExplorerEntry, NetworkProfile};

    #[test]
    fn test_builder_defaults() {
        let builder = DeployerBuilder::new("AuctionMarketplace");

        assert_eq!(builder.contract, "AuctionMarketplace");
        assert_eq!(builder.explorers, ExplorerTable::sei());
        assert_eq!(builder.records_dir, PathBuf::from("."));
        assert_eq!(builder.guidance, GuidanceConfig::default());
    }

    #[test]
    fn test_builder_from_config() {
        let mut config = SeishipConfig {
            contract: "Marketplace".to_string(),
            records_dir: PathBuf::from("deployments"),
            ..Default::default()
        };
        let mut local = NetworkProfile::sei_testnet();
        local.name = "local".to_string();
        local.chain_id = 31337;
        local.explorer_url = Some("http://localhost:4000".to_string());
        config.networks.push(local);

        let builder = DeployerBuilder::from_config(&config);

        assert_eq!(builder.contract, "Marketplace");
        assert_eq!(builder.records_dir, PathBuf::from("deployments"));
        assert_eq!(
            builder.explorers,
            ExplorerTable::sei().with_entry(ExplorerEntry::new(31337, "http://localhost:4000"))
        );
    }
}
