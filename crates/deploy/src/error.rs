//! Failure taxonomy of the deployment workflow.

use std::path::PathBuf;

use alloy_core::primitives::{Address, TxHash};
use thiserror::Error;

/// States of the deployment workflow, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum DeployStage {
    Start,
    IdentityAcquired,
    Broadcast,
    Confirmed,
    MetadataResolved,
    RecordPersisted,
    Success,
}

/// A failed deployment.
///
/// Every variant aborts the rest of the workflow. Nothing is retried.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("no usable signer account")]
    IdentityUnavailable(#[source] anyhow::Error),

    #[error("no deployable compiled artifact for contract `{contract}`")]
    CompiledArtifactNotFound {
        contract: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to broadcast the creation transaction for `{contract}`")]
    BroadcastFailed {
        contract: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("creation transaction {tx_hash} was not confirmed")]
    ConfirmationTimeout {
        tx_hash: TxHash,
        #[source]
        source: anyhow::Error,
    },

    #[error("creation transaction {tx_hash} reverted{}", block_suffix(.block_number))]
    TransactionReverted {
        tx_hash: TxHash,
        block_number: Option<u64>,
    },

    #[error("receipt of creation transaction {tx_hash} carries no contract address")]
    MissingContractAddress { tx_hash: TxHash },

    #[error("contract deployed at {address} but the network metadata could not be read")]
    NetworkUnavailable {
        address: Address,
        #[source]
        source: anyhow::Error,
    },

    #[error(
        "contract deployed at {address} but the deployment record could not be written to {}",
        .path.display()
    )]
    PersistenceFailed {
        address: Address,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

fn block_suffix(block_number: &Option<u64>) -> String {
    block_number
        .map(|n| format!(" in block {n}"))
        .unwrap_or_default()
}

impl DeployError {
    /// The last state the workflow reached before failing.
    pub fn stage(&self) -> DeployStage {
        match self {
            Self::IdentityUnavailable(_) => DeployStage::Start,
            Self::CompiledArtifactNotFound { .. } | Self::BroadcastFailed { .. } => {
                DeployStage::IdentityAcquired
            }
            Self::ConfirmationTimeout { .. }
            | Self::TransactionReverted { .. }
            | Self::MissingContractAddress { .. } => DeployStage::Broadcast,
            Self::NetworkUnavailable { .. } => DeployStage::Confirmed,
            Self::PersistenceFailed { .. } => DeployStage::MetadataResolved,
        }
    }

    /// Address of the contract when it is already live on-chain despite the failure.
    ///
    /// The operator has to reconcile these by hand, the local record is missing.
    pub fn live_address(&self) -> Option<Address> {
        match self {
            Self::NetworkUnavailable { address, .. } | Self::PersistenceFailed { address, .. } => {
                Some(*address)
            }
            _ => None,
        }
    }

    /// Whether the contract creation succeeded even though the workflow failed.
    pub fn contract_is_live(&self) -> bool {
        self.live_address().is_some()
    }
}

/// Process exit status for a workflow result: `0` on success, `1` on any failure.
pub fn exit_code<T>(result: &Result<T, DeployError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_core::primitives::address;

    #[test]
    fn test_stage_of_each_failure() {
        let tx_hash = TxHash::repeat_byte(0x11);
        let address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

        let cases = [
            (
                DeployError::IdentityUnavailable(anyhow::anyhow!("no key")),
                DeployStage::Start,
            ),
            (
                DeployError::CompiledArtifactNotFound {
                    contract: "Missing".to_string(),
                    source: anyhow::anyhow!("not found"),
                },
                DeployStage::IdentityAcquired,
            ),
            (
                DeployError::TransactionReverted {
                    tx_hash,
                    block_number: Some(7),
                },
                DeployStage::Broadcast,
            ),
            (
                DeployError::NetworkUnavailable {
                    address,
                    source: anyhow::anyhow!("rpc down"),
                },
                DeployStage::Confirmed,
            ),
            (
                DeployError::PersistenceFailed {
                    address,
                    path: PathBuf::from("deployment-seiTestnet-1.json"),
                    source: anyhow::anyhow!("read-only"),
                },
                DeployStage::MetadataResolved,
            ),
        ];

        for (error, stage) in cases {
            assert_eq!(error.stage(), stage, "wrong stage for {error}");
        }
    }

    #[test]
    fn test_only_post_confirmation_failures_are_live() {
        let address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

        let persistence = DeployError::PersistenceFailed {
            address,
            path: PathBuf::from("records/deployment-seiTestnet-1.json"),
            source: anyhow::anyhow!("permission denied"),
        };
        assert!(persistence.contract_is_live());
        assert_eq!(persistence.live_address(), Some(address));

        let broadcast = DeployError::BroadcastFailed {
            contract: "AuctionMarketplace".to_string(),
            source: anyhow::anyhow!("insufficient funds"),
        };
        assert!(!broadcast.contract_is_live());
    }

    #[test]
    fn test_error_messages() {
        let tx_hash = TxHash::repeat_byte(0x22);

        let reverted = DeployError::TransactionReverted {
            tx_hash,
            block_number: Some(42),
        };
        assert_eq!(
            reverted.to_string(),
            format!("creation transaction {tx_hash} reverted in block 42")
        );

        let reverted = DeployError::TransactionReverted {
            tx_hash,
            block_number: None,
        };
        assert_eq!(
            reverted.to_string(),
            format!("creation transaction {tx_hash} reverted")
        );
    }

    #[test]
    fn test_exit_code() {
        let ok: Result<(), DeployError> = Ok(());
        assert_eq!(exit_code(&ok), 0);

        let err: Result<(), DeployError> =
            Err(DeployError::IdentityUnavailable(anyhow::anyhow!("no key")));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(DeployStage::IdentityAcquired.to_string(), "identity-acquired");
        assert_eq!(DeployStage::RecordPersisted.as_ref(), "record-persisted");
    }
}
