use clap::{Parser, Subcommand};
use eyre::Result;
use log::LevelFilter;

mod commands;
mod config;
mod secure_key;

use commands::*;
use config::Config;

#[derive(Parser)]
#[command(name = "betting")]
#[command(about = "Deploy and operate the Betting contract")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<String>,

    /// Environment file path
    #[arg(long, global = true, default_value = ".env")]
    env_file: String,

    /// Network to run against (hardhat, localhost, goerli, sepolia, mainnet or a configured one)
    #[arg(short = 'n', long, global = true, default_value = "localhost")]
    network: String,

    /// Named account whose key signs transactions (deployer, user2, user3)
    #[arg(short = 'a', long, global = true, default_value = "deployer")]
    account: String,

    /// Private key source (env:VAR_NAME or file:/path), overrides --account
    #[arg(short = 'k', long, global = true)]
    key: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the Betting contract, then optionally fund and verify it
    Deploy(DeployArgs),
    /// Enter the deployed Betting contract, paying its entrance fee
    Enter(EnterArgs),
    /// Transfer LINK to a contract
    FundLink(FundLinkArgs),
    /// Check whether a contract can be auto-funded with LINK
    FundCheck(FundCheckArgs),
    /// Show the state of the deployed Betting contract
    Status,
    /// List the configured network profiles
    Networks,
    /// Write the deployed address and ABI to the front-end files
    ExportFrontEnd,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = match cli.log_level.as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => eyre::bail!("invalid log level: {}", cli.log_level),
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let config = Config::load(cli.config.as_deref(), &cli.env_file)?;
    let ctx = Context {
        config,
        network: cli.network,
        account: cli.account,
        key: cli.key,
    };

    match cli.command {
        Commands::Deploy(args) => deploy::handle_command(args, &ctx).await,
        Commands::Enter(args) => enter::handle_command(args, &ctx).await,
        Commands::FundLink(args) => fund::fund_link(args, &ctx).await,
        Commands::FundCheck(args) => fund::fund_check(args, &ctx).await,
        Commands::Status => status::handle_command(&ctx).await,
        Commands::Networks => networks::handle_command(&ctx),
        Commands::ExportFrontEnd => export::handle_command(&ctx),
    }
}
