//! seiship-deploy - Contract deployment library for the Sei EVM networks.
//!
//! This crate deploys a compiled Hardhat contract through a [`DeployProvider`], derives
//! the block explorer link of the result and writes a durable deployment record.

mod artifact;
pub use artifact::{ArtifactStore, ContractArtifact};

mod builder;
pub use builder::DeployerBuilder;

mod clock;
pub use clock::{Clock, SystemClock};

mod config;
pub use config::{CONFIG_FILENAME, ENV_PREFIX, SeishipConfig, init_config_file};

mod deployer;
pub use deployer::{Deployer, DeploymentOutcome};

mod error;
pub use error::{DeployError, DeployStage, exit_code};

mod explorer;
pub use explorer::{ExplorerEntry, ExplorerTable};

mod guidance;
pub use guidance::{ADDRESS_PLACEHOLDER, Guidance, GuidanceConfig};

mod network;
pub use network::{NetworkDescriptor, NetworkProfile, SEI_MAINNET_CHAIN_ID, SEI_TESTNET_CHAIN_ID};

mod provider;
pub use provider::{DeployProvider, DeploymentReceipt, PendingDeployment, SignerInfo};

mod record;
pub use record::{
    DeploymentRecord, RECORD_FILE_PREFIX, RecordStore, StoredRecord, parse_record_file_name,
    record_file_name,
};

mod report;
pub use report::{ConsoleReporter, DeployEvent, Reporter, records_table};

mod rpc;
pub use rpc::RpcProvider;

mod signer;
pub use signer::load_signer;
