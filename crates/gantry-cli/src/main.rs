//! Gantry - on-chain component provisioner
//!
//! Usage:
//!   gantry plan     # validate configuration, print the execution order
//!   gantry deploy   # deploy, register and wire all components

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gantry_core::chain::foundry::FoundryClient;
use gantry_core::component::{ComponentNames, TOKEN_CONTRACT};
use gantry_core::config::{Accounts, ProvisionConfig};
use gantry_core::orchestration::{DeployPlan, Provisioner};
use gantry_core::record::DeploymentRecord;

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Deploy and register instance components", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration and print the dependency-ordered plan
    Plan(ConfigArgs),

    /// Deploy, register and wire all components
    Deploy(Box<DeployArgs>),
}

#[derive(Args)]
struct ConfigArgs {
    /// TOML file with the named owner accounts
    #[arg(long, default_value = "gantry.toml")]
    accounts: PathBuf,

    /// Optional .env file loaded before reading the environment
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[derive(Args)]
struct DeployArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// JSON-RPC endpoint of the target chain
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    rpc_url: String,

    /// Foundry project containing the component contracts
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Where to write the deployment record
    #[arg(long, default_value = "deployments.json")]
    record: PathBuf,

    /// Explicit distribution name (randomized suffix otherwise)
    #[arg(long)]
    distribution_name: Option<String>,

    /// Explicit pool name (randomized suffix otherwise)
    #[arg(long)]
    pool_name: Option<String>,

    /// Explicit product name (randomized suffix otherwise)
    #[arg(long)]
    product_name: Option<String>,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gantry=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => run_plan(args),
        Commands::Deploy(args) => run_deploy(*args),
    };

    if let Err(err) = result {
        tracing::error!("provisioning failed: {err:?}");
        std::process::exit(1);
    }
}

fn load_inputs(args: &ConfigArgs) -> Result<(ProvisionConfig, Accounts)> {
    if let Some(ref path) = args.env_file {
        dotenvy::from_path(path)
            .with_context(|| format!("Failed to load env file {}", path.display()))?;
    } else {
        // A local .env is optional
        let _ = dotenvy::dotenv();
    }

    let config = ProvisionConfig::from_env()?;
    let accounts = Accounts::load(&args.accounts)?;
    Ok((config, accounts))
}

fn run_plan(args: ConfigArgs) -> Result<()> {
    let (config, accounts) = load_inputs(&args)?;

    println!("instance {} ({})", config.instance_address, config.instance_nft_id);
    println!("1. grant owner roles via the instance access manager");
    println!(
        "2. deploy payment token {TOKEN_CONTRACT} as {}",
        accounts.protocol_owner
    );
    for (index, kind) in DeployPlan::standard().ordered().iter().enumerate() {
        let deps = kind.dependencies();
        if deps.is_empty() {
            println!("{}. deploy + register {kind}", index + 3);
        } else {
            let needs: Vec<String> = deps.iter().map(|dep| dep.to_string()).collect();
            println!(
                "{}. deploy + register {kind} (needs {})",
                index + 3,
                needs.join(", ")
            );
        }
    }
    Ok(())
}

fn run_deploy(args: DeployArgs) -> Result<()> {
    let (config, accounts) = load_inputs(&args.config)?;
    FoundryClient::ensure_toolchain()?;

    let client = FoundryClient::new(args.rpc_url, args.project_root);
    let names = ComponentNames {
        distribution: args.distribution_name,
        pool: args.pool_name,
        product: args.product_name,
    };

    let outcome = Provisioner::new(&client, config, accounts)
        .with_names(names)
        .run()?;

    println!("payment token deployed at {}", outcome.token);
    for component in outcome.components.values() {
        println!(
            "{} {} registered at {} with nft id {}",
            component.kind, component.name, component.address, component.nft_id
        );
    }

    let record = DeploymentRecord::from_outcome(&outcome)
        .to_json()
        .context("Failed to serialize deployment record")?;
    std::fs::write(&args.record, record).with_context(|| {
        format!(
            "Failed to write deployment record to {}",
            args.record.display()
        )
    })?;
    println!("deployment record written to {}", args.record.display());

    Ok(())
}
