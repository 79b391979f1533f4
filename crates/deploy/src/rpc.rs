//! [`DeployProvider`] over a JSON-RPC endpoint.

use std::time::Duration;

use alloy_core::primitives::Address;
use alloy_network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy_provider::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use url::Url;

use crate::{
    ArtifactStore, ContractArtifact, DeployProvider, DeploymentReceipt, NetworkDescriptor,
    NetworkProfile, PendingDeployment, SignerInfo,
};

/// Connection to one configured network.
///
/// Gas, nonce and chain id of the creation transaction are filled in by the provider.
#[derive(Clone)]
pub struct RpcProvider {
    provider: DynProvider,
    signer: Option<Address>,
    profile: NetworkProfile,
    artifacts: ArtifactStore,
    confirmations: u64,
    timeout: Option<Duration>,
}

impl RpcProvider {
    /// Connect to the profile's endpoint and check that it serves the expected chain.
    pub async fn connect(
        profile: NetworkProfile,
        signer: Option<PrivateKeySigner>,
        artifacts: ArtifactStore,
    ) -> Result<Self> {
        let url: Url = profile
            .rpc_url
            .parse()
            .with_context(|| format!("Invalid RPC URL for {}: {}", profile.name, profile.rpc_url))?;

        let address = signer.as_ref().map(|signer| signer.address());
        let provider = match signer {
            Some(signer) => ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect_http(url)
                .erased(),
            None => ProviderBuilder::new().connect_http(url).erased(),
        };

        let rpc = Self::from_provider(provider, address, profile, artifacts);
        rpc.check_chain_id().await?;

        tracing::info!(
            network = %rpc.profile.name,
            rpc_url = %rpc.profile.rpc_url,
            chain_id = rpc.profile.chain_id,
            "Connected to network"
        );

        Ok(rpc)
    }

    /// Wrap an already built provider. No connection check is made.
    pub fn from_provider(
        provider: DynProvider,
        signer: Option<Address>,
        profile: NetworkProfile,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            provider,
            signer,
            profile,
            artifacts,
            confirmations: 1,
            timeout: None,
        }
    }

    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    /// Stop waiting for the receipt after `timeout`. `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn profile(&self) -> &NetworkProfile {
        &self.profile
    }

    /// Fail unless the endpoint reports the chain id the profile declares.
    pub async fn check_chain_id(&self) -> Result<()> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .with_context(|| format!("Failed to reach RPC endpoint {}", self.profile.rpc_url))?;

        if chain_id != self.profile.chain_id {
            anyhow::bail!(
                "RPC endpoint {} serves chain id {}, but network {} expects {}",
                self.profile.rpc_url,
                chain_id,
                self.profile.name,
                self.profile.chain_id
            );
        }

        Ok(())
    }
}

impl DeployProvider for RpcProvider {
    async fn default_signer(&self) -> Result<SignerInfo> {
        let address = self
            .signer
            .context("No deployer account configured, set PRIVATE_KEY or MNEMONIC")?;

        let balance = match self.provider.get_balance(address).await {
            Ok(balance) => Some(balance),
            Err(err) => {
                tracing::warn!(%address, error = %err, "Failed to query deployer balance");
                None
            }
        };

        Ok(SignerInfo { address, balance })
    }

    async fn contract_factory(&self, name: &str) -> Result<ContractArtifact> {
        self.artifacts.load(name)
    }

    async fn deploy(&self, artifact: &ContractArtifact) -> Result<PendingDeployment> {
        let from = self
            .signer
            .context("No deployer account configured, set PRIVATE_KEY or MNEMONIC")?;

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(artifact.bytecode.clone());

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .with_context(|| format!("{} rejected the creation transaction", self.profile.rpc_url))?;

        Ok(PendingDeployment {
            contract: artifact.name.clone(),
            tx_hash: *pending.tx_hash(),
        })
    }

    async fn await_confirmation(&self, pending: &PendingDeployment) -> Result<DeploymentReceipt> {
        let receipt =
            PendingTransactionBuilder::new(self.provider.root().clone(), pending.tx_hash)
                .with_required_confirmations(self.confirmations)
                .with_timeout(self.timeout)
                .get_receipt()
                .await
                .with_context(|| {
                    format!(
                        "Failed waiting for {} confirmation(s) of {}",
                        self.confirmations, pending.tx_hash
                    )
                })?;

        Ok(DeploymentReceipt {
            tx_hash: receipt.transaction_hash(),
            contract_address: receipt.contract_address(),
            success: receipt.status(),
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
        })
    }

    async fn network(&self) -> Result<NetworkDescriptor> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .context("Failed to query chain id")?;

        if chain_id != self.profile.chain_id {
            tracing::warn!(
                network = %self.profile.name,
                expected = self.profile.chain_id,
                actual = chain_id,
                "Endpoint chain id changed since connecting"
            );
        }

        Ok(NetworkDescriptor {
            name: self.profile.name.clone(),
            chain_id,
        })
    }
}
