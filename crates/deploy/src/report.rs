//! Operator-facing output of the deployment workflow.
//!
//! The facts the operator acts on are emitted as [`DeployEvent`]s, in workflow order.
//! Diagnostics go through `tracing` instead.

use std::io::Write;
use std::path::PathBuf;

use alloy_core::primitives::{Address, TxHash, U256, utils::format_ether};
use comfy_table::{Table, presets::UTF8_FULL};

use crate::{Guidance, NetworkDescriptor, StoredRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// The signer and its balance in wei, `None` when unknown.
    Identity {
        address: Address,
        balance: Option<U256>,
    },
    Broadcasting {
        contract: String,
    },
    Submitted {
        tx_hash: TxHash,
    },
    Deployed {
        contract: String,
        address: Address,
        tx_hash: TxHash,
    },
    Network(NetworkDescriptor),
    /// Only emitted when the chain has an explorer.
    Explorer {
        url: String,
    },
    NextSteps(Guidance),
    RecordSaved {
        path: PathBuf,
    },
}

/// Sink for [`DeployEvent`]s.
pub trait Reporter {
    fn report(&mut self, event: DeployEvent);
}

/// Collects the events, for inspection after the run.
impl Reporter for Vec<DeployEvent> {
    fn report(&mut self, event: DeployEvent) {
        self.push(event);
    }
}

/// Human-readable progress lines.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    out: W,
    currency: String,
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout(currency: impl Into<String>) -> Self {
        Self::new(std::io::stdout(), currency)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, currency: impl Into<String>) -> Self {
        Self {
            out,
            currency: currency.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, event: &DeployEvent) -> String {
        match event {
            DeployEvent::Identity { address, balance } => {
                let balance = balance
                    .map(|wei| format!("{} {}", format_ether(wei), self.currency))
                    .unwrap_or_else(|| "unknown".to_string());
                format!("Deployer account: {address}\nAccount balance: {balance}")
            }
            DeployEvent::Broadcasting { contract } => format!("Deploying {contract}..."),
            DeployEvent::Submitted { tx_hash } => format!("Transaction sent: {tx_hash}"),
            DeployEvent::Deployed {
                contract, address, ..
            } => format!("\n{contract} deployed\nContract address: {address}"),
            DeployEvent::Network(network) => {
                format!("Network: {}\nChain ID: {}", network.name, network.chain_id)
            }
            DeployEvent::Explorer { url } => format!("Explorer: {url}"),
            DeployEvent::NextSteps(guidance) => format!("\n{guidance}"),
            DeployEvent::RecordSaved { path } => {
                format!("\nDeployment record saved to {}", path.display())
            }
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, event: DeployEvent) {
        let line = self.render(&event);
        if let Err(err) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            tracing::warn!(error = %err, "Failed to write deployment progress");
        }
    }
}

/// Table of stored deployment records.
pub fn records_table(records: &[StoredRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Network",
        "Chain ID",
        "Contract",
        "Deployer",
        "Timestamp",
        "Explorer",
    ]);

    for stored in records {
        let record = &stored.record;
        table.add_row(vec![
            record.network.as_str(),
            record.chain_id.as_str(),
            record.contract_address.as_str(),
            record.deployer.as_str(),
            record.timestamp.as_str(),
            record.explorer_url.as_str(),
        ]);
    }

    table
}
