use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use seiship_deploy::SeishipConfig;
use tracing::level_filters::LevelFilter;

/// The network deployed to when none is given.
const DEFAULT_NETWORK: &str = "seiTestnet";

#[derive(Parser)]
#[command(name = "seiship")]
#[command(
    author,
    version,
    about = "Deploy a compiled contract to the Sei EVM and keep a record of it"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, global = true, env = "SEISHIP_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// Path to a Seiship.toml configuration file, or the directory holding it.
    ///
    /// If not provided, ./Seiship.toml is used when it exists.
    #[arg(long, global = true, alias = "conf", env = "SEISHIP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deploy the contract and write a deployment record.
    Deploy(DeployArgs),
    /// List the deployment records.
    Records(RecordsArgs),
    /// Write a Seiship.toml with the default settings.
    Init(InitArgs),
}

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// The network to deploy to, as named in the configuration.
    #[arg(short, long, env = "SEISHIP_NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Hex private key of the deployer account.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// BIP-39 mnemonic of the deployer account, used when no private key is set.
    #[arg(long, env = "MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// Derivation index of the deployer account in the mnemonic.
    #[arg(long, env = "MNEMONIC_INDEX", default_value_t = 0)]
    pub mnemonic_index: u32,

    /// Name of the compiled contract to deploy.
    #[arg(long)]
    pub contract: Option<String>,

    /// The Hardhat artifacts directory.
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// The directory deployment records are written to.
    #[arg(long)]
    pub records_dir: Option<PathBuf>,

    /// Number of confirmations to wait for.
    #[arg(long)]
    pub confirmations: Option<u64>,

    /// Give up waiting for the receipt after this many seconds.
    #[arg(long)]
    pub confirmation_timeout: Option<u64>,
}

impl DeployArgs {
    /// Apply the flags given on the command line over the loaded configuration.
    pub fn apply(&self, config: &mut SeishipConfig) {
        if let Some(contract) = &self.contract {
            config.contract = contract.clone();
        }
        if let Some(artifacts) = &self.artifacts {
            config.artifacts = artifacts.clone();
        }
        if let Some(records_dir) = &self.records_dir {
            config.records_dir = records_dir.clone();
        }
        if let Some(confirmations) = self.confirmations {
            config.confirmations = confirmations;
        }
        if let Some(timeout) = self.confirmation_timeout {
            config.confirmation_timeout_secs = Some(timeout);
        }
    }
}

#[derive(Debug, Args)]
pub struct RecordsArgs {
    /// The directory holding the deployment records.
    #[arg(long)]
    pub records_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to write Seiship.toml into.
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("seiship").chain(args.iter().copied()))
            .expect("Failed to parse arguments")
    }

    #[test]
    fn test_deploy_flags() {
        let cli = parse(&[
            "deploy",
            "--network",
            "seiMainnet",
            "--contract",
            "Marketplace",
            "--records-dir",
            "deployments",
            "--confirmations",
            "3",
        ]);

        let Command::Deploy(args) = cli.command else {
            panic!("expected the deploy command");
        };
        assert_eq!(args.network, "seiMainnet");

        let mut config = SeishipConfig::default();
        args.apply(&mut config);
        assert_eq!(config.contract, "Marketplace");
        assert_eq!(config.records_dir, PathBuf::from("deployments"));
        assert_eq!(config.confirmations, 3);
        assert_eq!(config.artifacts, PathBuf::from("artifacts"));
        assert_eq!(config.confirmation_timeout_secs, None);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let cli = parse(&["deploy"]);
        let Command::Deploy(args) = cli.command else {
            panic!("expected the deploy command");
        };

        let mut config = SeishipConfig::default();
        args.apply(&mut config);
        assert_eq!(config, SeishipConfig::default());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["records", "--config", "ops/Seiship.toml", "-v", "debug"]);

        assert_eq!(cli.config, Some(PathBuf::from("ops/Seiship.toml")));
        assert_eq!(cli.verbosity, LevelFilter::DEBUG);
        assert!(matches!(cli.command, Command::Records(_)));
    }

    #[test]
    fn test_init_default_dir() {
        let cli = parse(&["init"]);
        let Command::Init(args) = cli.command else {
            panic!("expected the init command");
        };
        assert_eq!(args.dir, PathBuf::from("."));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["seiship"]).is_err());
    }
}
