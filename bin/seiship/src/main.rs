//! seiship deploys a compiled Hardhat contract to the Sei EVM and records where it went.

mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command, DeployArgs, InitArgs, RecordsArgs};
use seiship_deploy::{
    ArtifactStore, ConsoleReporter, Deployer, DeployerBuilder, RecordStore, RpcProvider,
    SeishipConfig, exit_code, init_config_file, load_signer, records_table,
};

#[tokio::main]
async fn main() -> ExitCode {
    // PRIVATE_KEY and friends may live in a .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr, stdout is kept for the deployment facts.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Command::Deploy(args) => return deploy(config_path, &args).await,
        Command::Records(args) => list_records(config_path, &args),
        Command::Init(args) => init(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load the configuration, the signer and connect to the selected network.
async fn prepare(
    config_path: Option<&Path>,
    args: &DeployArgs,
) -> Result<(Deployer<RpcProvider>, String)> {
    let mut config = SeishipConfig::load(config_path)?;
    args.apply(&mut config);

    let profile = config.profile(&args.network)?.clone();
    let signer = load_signer(
        args.private_key.as_deref(),
        args.mnemonic.as_deref(),
        args.mnemonic_index,
    )?;

    tracing::info!(
        network = %profile.name,
        contract = %config.contract,
        artifacts = %config.artifacts.display(),
        records_dir = %config.records_dir.display(),
        "Preparing deployment..."
    );

    let currency = profile.currency.clone();
    let provider = RpcProvider::connect(profile, signer, ArtifactStore::new(&config.artifacts))
        .await?
        .with_confirmations(config.confirmations)
        .with_timeout(config.confirmation_timeout_secs.map(Duration::from_secs));

    Ok((DeployerBuilder::from_config(&config).build(provider), currency))
}

async fn deploy(config_path: Option<&Path>, args: &DeployArgs) -> ExitCode {
    let (deployer, currency) = match prepare(config_path, args).await {
        Ok(prepared) => prepared,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut console = ConsoleReporter::stdout(currency);
    let result = deployer.run(&mut console).await;
    let code = exit_code(&result);

    match result {
        Ok(outcome) => {
            tracing::info!(
                address = %outcome.record.contract_address,
                record = %outcome.record_path.display(),
                "Deployment complete"
            );
        }
        Err(err) => {
            let stage = err.stage();
            let live_address = err.live_address();
            eprintln!("Deployment failed after stage {stage}: {:#}", anyhow::Error::new(err));
            if let Some(address) = live_address {
                eprintln!(
                    "The contract is live at {address} but no deployment record was written. \
                     Save the address manually, it can be found again on the block explorer."
                );
            }
        }
    }

    ExitCode::from(code)
}

fn list_records(config_path: Option<&Path>, args: &RecordsArgs) -> Result<()> {
    let config = SeishipConfig::load(config_path)?;
    let dir = args.records_dir.clone().unwrap_or(config.records_dir);

    let records = RecordStore::new(&dir).list()?;
    if records.is_empty() {
        println!("No deployment records in {}", dir.display());
        return Ok(());
    }

    println!("{}", records_table(&records));
    Ok(())
}

fn init(args: &InitArgs) -> Result<()> {
    let path = init_config_file(&args.dir)?;
    println!("Wrote {}", path.display());
    Ok(())
}
