//! The chain-facing capabilities the deployment workflow depends on.

use std::future::Future;

use alloy_core::primitives::{Address, TxHash, U256};
use anyhow::Result;

use crate::{ContractArtifact, NetworkDescriptor};

/// The account that signs and pays for the creation transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignerInfo {
    pub address: Address,
    /// Native balance in wei, `None` when it could not be queried.
    pub balance: Option<U256>,
}

/// A creation transaction that has been accepted by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeployment {
    pub contract: String,
    pub tx_hash: TxHash,
}

/// Receipt of a confirmed creation transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentReceipt {
    pub tx_hash: TxHash,
    pub contract_address: Option<Address>,
    /// `false` when the transaction was included but reverted.
    pub success: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Signer, contract factory and network queries of a connected chain.
///
/// Every method may fail. The workflow maps the failure to its own error for the step
/// that called it and never retries.
pub trait DeployProvider: Send + Sync {
    /// The account used to sign the creation transaction.
    fn default_signer(&self) -> impl Future<Output = Result<SignerInfo>> + Send;

    /// Resolve a compiled contract by name.
    fn contract_factory(&self, name: &str)
    -> impl Future<Output = Result<ContractArtifact>> + Send;

    /// Broadcast the creation transaction of `artifact`, without constructor arguments.
    fn deploy(
        &self,
        artifact: &ContractArtifact,
    ) -> impl Future<Output = Result<PendingDeployment>> + Send;

    /// Wait until the creation transaction is included.
    fn await_confirmation(
        &self,
        pending: &PendingDeployment,
    ) -> impl Future<Output = Result<DeploymentReceipt>> + Send;

    /// The network the provider is connected to.
    fn network(&self) -> impl Future<Output = Result<NetworkDescriptor>> + Send;
}
