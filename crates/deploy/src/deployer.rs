use std::path::PathBuf;

use alloy_core::primitives::U256;

use crate::{
    Clock, DeployError, DeployEvent, DeployProvider, DeployStage, DeploymentReceipt,
    DeploymentRecord, ExplorerTable, Guidance, GuidanceConfig, NetworkDescriptor, RecordStore,
    Reporter, SignerInfo, SystemClock,
};

/// Everything a successful deployment produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    pub signer: SignerInfo,
    pub receipt: DeploymentReceipt,
    pub network: NetworkDescriptor,
    pub record: DeploymentRecord,
    pub record_path: PathBuf,
}

/// Deploys one compiled contract and records the result.
///
/// Built through [`DeployerBuilder`](crate::DeployerBuilder). A run is a single
/// at-most-once attempt: the first failing step aborts it and nothing is retried.
#[derive(Debug, Clone)]
pub struct Deployer<P, C = SystemClock> {
    pub(crate) provider: P,
    pub(crate) contract: String,
    pub(crate) explorers: ExplorerTable,
    pub(crate) records: RecordStore,
    pub(crate) guidance: GuidanceConfig,
    pub(crate) clock: C,
}

impl<P, C> Deployer<P, C> {
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }
}

fn enter(stage: DeployStage) {
    tracing::info!(stage = %stage, "Deployment stage reached");
}

impl<P: DeployProvider, C: Clock> Deployer<P, C> {
    /// Run the deployment workflow.
    ///
    /// Operator facts are sent to `reporter` as they become known, so the deployed
    /// address has been reported before the record is written. A record file exists
    /// if and only if the result is `Ok`.
    pub async fn run<R: Reporter + ?Sized>(
        &self,
        reporter: &mut R,
    ) -> Result<DeploymentOutcome, DeployError> {
        enter(DeployStage::Start);

        let signer = self
            .provider
            .default_signer()
            .await
            .map_err(DeployError::IdentityUnavailable)?;
        enter(DeployStage::IdentityAcquired);

        match signer.balance {
            Some(balance) if balance == U256::ZERO => {
                tracing::warn!(address = %signer.address, "Deployer account has a zero balance");
            }
            Some(_) => {}
            None => tracing::warn!(address = %signer.address, "Deployer balance is unknown"),
        }
        reporter.report(DeployEvent::Identity {
            address: signer.address,
            balance: signer.balance,
        });

        reporter.report(DeployEvent::Broadcasting {
            contract: self.contract.clone(),
        });
        let artifact = self
            .provider
            .contract_factory(&self.contract)
            .await
            .map_err(|source| DeployError::CompiledArtifactNotFound {
                contract: self.contract.clone(),
                source,
            })?;

        let pending = self.provider.deploy(&artifact).await.map_err(|source| {
            DeployError::BroadcastFailed {
                contract: self.contract.clone(),
                source,
            }
        })?;
        enter(DeployStage::Broadcast);
        tracing::info!(tx_hash = %pending.tx_hash, contract = %pending.contract, "Creation transaction sent");
        reporter.report(DeployEvent::Submitted {
            tx_hash: pending.tx_hash,
        });

        let receipt = self
            .provider
            .await_confirmation(&pending)
            .await
            .map_err(|source| DeployError::ConfirmationTimeout {
                tx_hash: pending.tx_hash,
                source,
            })?;
        if !receipt.success {
            return Err(DeployError::TransactionReverted {
                tx_hash: receipt.tx_hash,
                block_number: receipt.block_number,
            });
        }
        let address = receipt
            .contract_address
            .ok_or(DeployError::MissingContractAddress {
                tx_hash: receipt.tx_hash,
            })?;
        enter(DeployStage::Confirmed);
        tracing::info!(
            %address,
            block_number = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "Contract deployed"
        );
        reporter.report(DeployEvent::Deployed {
            contract: self.contract.clone(),
            address,
            tx_hash: receipt.tx_hash,
        });

        let network = self
            .provider
            .network()
            .await
            .map_err(|source| DeployError::NetworkUnavailable { address, source })?;
        enter(DeployStage::MetadataResolved);
        reporter.report(DeployEvent::Network(network.clone()));

        let explorer_url = self.explorers.address_url(network.chain_id, &address);
        match &explorer_url {
            Some(url) => reporter.report(DeployEvent::Explorer { url: url.clone() }),
            None => tracing::debug!(chain_id = network.chain_id, "No explorer for chain"),
        }

        let guidance = Guidance::new(&self.guidance, &artifact, &address, &network.name);
        reporter.report(DeployEvent::NextSteps(guidance));

        let written_at = self.clock.now();
        let record =
            DeploymentRecord::new(&network, address, signer.address, written_at, explorer_url);
        let record_path = self.records.persist(&record, written_at).map_err(|source| {
            DeployError::PersistenceFailed {
                address,
                path: self
                    .records
                    .path_for(&network.name, written_at.timestamp_millis()),
                source,
            }
        })?;
        enter(DeployStage::RecordPersisted);
        reporter.report(DeployEvent::RecordSaved {
            path: record_path.clone(),
        });

        enter(DeployStage::Success);

        Ok(DeploymentOutcome {
            signer,
            receipt,
            network,
            record,
            record_path,
        })
    }
}
